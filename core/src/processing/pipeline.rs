use crate::lhco_interface::{EventBlock, LhcoReader};
use crate::prelude::{AnalysisConfig, ProcessingStage, StageResult};
use crate::processing::assembler::EventAssembler;
use crate::processing::event::Event;
use crate::processing::features::DerivedStage;
use crate::processing::selection::SelectionStage;
use std::io::BufRead;

/// Runs assembly, derived features and selection on one event block at a time.
pub struct EventPipeline {
    assembler: EventAssembler,
    derived: DerivedStage,
    selection: SelectionStage,
}

impl EventPipeline {
    pub fn new(config: &AnalysisConfig) -> StageResult<Self> {
        let mut derived = DerivedStage::new();
        derived.initialize(config)?;
        let mut selection = SelectionStage::new();
        selection.initialize(config)?;
        Ok(Self {
            assembler: EventAssembler::new(config),
            derived,
            selection,
        })
    }

    pub fn process_block(&mut self, block: &EventBlock) -> StageResult<Event> {
        let mut event = self.assembler.assemble(block);
        self.derived.execute(&mut event)?;
        self.selection.execute(&mut event)?;
        Ok(event)
    }

    /// Streams every event of an LHCO input through `sink`, stopping at the first error.
    pub fn for_each_event<R, F>(&mut self, input: R, mut sink: F) -> StageResult<()>
    where
        R: BufRead,
        F: FnMut(Event) -> StageResult<()>,
    {
        for block in LhcoReader::new(input) {
            let event = self.process_block(&block?)?;
            sink(event)?;
        }
        Ok(())
    }

    /// Reads and fully processes every event of an LHCO input.
    pub fn read_events<R: BufRead>(&mut self, input: R) -> StageResult<Vec<Event>> {
        let mut events = Vec::new();
        self.for_each_event(input, |event| {
            events.push(event);
            Ok(())
        })?;
        Ok(events)
    }

    pub fn cleanup(&mut self) {
        self.derived.cleanup();
        self.selection.cleanup();
    }
}
