pub mod annotation_ops;
pub mod effectiveness_ops;
pub mod priors_ops;
pub mod sample_ops;
