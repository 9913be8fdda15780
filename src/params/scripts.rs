//! Options that belong to a single entry point rather than a shared group

use crate::domain::{GroupSchema, ParamSpec};

pub const TRAIN_TITLE: &str = "Training Options";
pub const RENDER_TITLE: &str = "Rendering Options";

pub fn train_options() -> GroupSchema {
    GroupSchema::new(TRAIN_TITLE)
        .param("ip", "127.0.0.1")
        .param("port", 6009)
        .push(ParamSpec::new("debug_from", -1).with_help("Iteration to start debugging from"))
        .param("detect_anomaly", false)
        .param("quiet", false)
        .push(ParamSpec::new("start_checkpoint", "").with_help("Checkpoint to resume from"))
}

pub fn render_options() -> GroupSchema {
    GroupSchema::new(RENDER_TITLE)
        .push(ParamSpec::new("iteration", -1).with_help("Iteration to render (-1 for latest)"))
        .param("skip_train", false)
        .param("skip_test", false)
        .param("quiet", false)
}
