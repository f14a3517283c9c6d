pub mod object;
pub mod reader;
pub mod record;

pub use object::{classify, Candidate, Jet, Lepton, MissingEt, PhysicsObject};
pub use reader::{EventBlock, LhcoReader};
pub use record::RawRecord;
