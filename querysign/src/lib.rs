#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use querysign_core::*;

#[cfg(feature = "aws")]
pub mod aws {
    pub use querysign_aws::*;
}
