// Domain layer: probe models and ports (interfaces). Only bson/serde leak in here.

pub mod model;
pub mod ports;
