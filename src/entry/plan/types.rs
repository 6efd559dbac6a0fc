use crate::args::LoadArgs;
use crate::logging::LoggerConfig;

pub(in crate::entry) struct LoadPlan {
    pub(super) args: LoadArgs,
    pub(super) logging: LoggerConfig,
}

pub(in crate::entry) enum RunPlan {
    List,
    Load(Box<LoadPlan>),
}
