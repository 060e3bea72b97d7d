// This file declares the existence of our command modules.

pub mod ping;
pub mod prefix;
pub mod quiz;
