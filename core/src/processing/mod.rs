pub mod assembler;
pub mod event;
pub mod features;
pub mod pairing;
pub mod pipeline;
pub mod selection;
pub mod serializer;

pub use assembler::EventAssembler;
pub use event::{DerivedFeatures, Event, HiggsPair, MetSummary};
pub use features::DerivedStage;
pub use pipeline::EventPipeline;
pub use selection::SelectionStage;
pub use serializer::{format_row, FeatureMode, FeatureSerializer};
