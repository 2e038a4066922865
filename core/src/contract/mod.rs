pub mod adapter;
pub mod constraints;
pub mod model;
pub mod tier;

pub use model::{
    GovernanceAttestation, GovernancePolicy, GovernanceStatus, IptcCore, JobType,
    MetadataContract, PageRole, XmpExtension,
};
pub use tier::EmbedTier;
