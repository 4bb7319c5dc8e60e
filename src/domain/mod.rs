// Domain layer: the resume record, wire envelopes and the ports the session talks to.

pub mod model;
pub mod ports;
