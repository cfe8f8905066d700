//! Animation domain: publishing controller outputs as animator parameters.

use bevy::prelude::*;

use crate::animation::{AnimationIds, AnimationParameterNames, AnimationSink};
use crate::locomotion::LocomotionOutputs;

#[derive(Resource, Debug, Clone, Default)]
pub struct AnimationBridge {
    ids: AnimationIds,
}

impl AnimationBridge {
    pub fn new(names: &AnimationParameterNames) -> Self {
        Self {
            ids: AnimationIds::resolve(names),
        }
    }

    pub fn ids(&self) -> &AnimationIds {
        &self.ids
    }

    /// Write one tick's outputs to `sink`. Without a sink this does nothing.
    pub fn publish(&self, sink: Option<&mut dyn AnimationSink>, outputs: &LocomotionOutputs) {
        let Some(sink) = sink else {
            return;
        };

        sink.set_float(self.ids.move_speed, outputs.move_speed);
        sink.set_bool(self.ids.grounded, outputs.grounded);
        sink.set_bool(self.ids.falling, outputs.falling);
        sink.set_bool(self.ids.swimming, outputs.swimming);
        if outputs.jump {
            sink.set_trigger(self.ids.jump);
        }
        if outputs.hard_land {
            sink.set_trigger(self.ids.hard_land);
        }
    }
}
