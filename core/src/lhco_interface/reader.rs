use crate::lhco_interface::record::RawRecord;
use crate::prelude::{StageError, StageResult};
use std::io::BufRead;

/// Object lines belonging to one event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventBlock {
    /// 0-based position among the non-empty blocks of the input.
    pub ordinal: usize,
    pub records: Vec<RawRecord>,
}

/// Streams event blocks out of LHCO text, one block at a time.
///
/// A line whose first token is `0` closes the current block. Blank lines and
/// `#` comments are skipped, and blocks without object lines are never yielded.
/// The first malformed object line ends the iteration with a format error.
pub struct LhcoReader<R> {
    lines: std::io::Lines<R>,
    line_number: usize,
    current: Vec<RawRecord>,
    emitted: usize,
    finished: bool,
}

impl<R: BufRead> LhcoReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            lines: input.lines(),
            line_number: 0,
            current: Vec::new(),
            emitted: 0,
            finished: false,
        }
    }

    fn take_block(&mut self) -> Option<EventBlock> {
        if self.current.is_empty() {
            return None;
        }
        let block = EventBlock {
            ordinal: self.emitted,
            records: std::mem::take(&mut self.current),
        };
        self.emitted += 1;
        Some(block)
    }

    fn fail(&mut self, err: StageError) -> Option<StageResult<EventBlock>> {
        self.finished = true;
        self.current.clear();
        Some(Err(err))
    }
}

fn is_event_marker(line: &str) -> bool {
    line.split_whitespace().next() == Some("0")
}

impl<R: BufRead> Iterator for LhcoReader<R> {
    type Item = StageResult<EventBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(err)) => return self.fail(err.into()),
                None => {
                    self.finished = true;
                    return self.take_block().map(Ok);
                }
            };
            self.line_number += 1;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if is_event_marker(line) {
                if let Some(block) = self.take_block() {
                    return Some(Ok(block));
                }
                continue;
            }

            match RawRecord::parse(line, self.line_number) {
                Ok(record) => self.current.push(record),
                Err(err) => return self.fail(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
#  typ      eta    phi      pt    jmas  ntrk  btag   had/em  dum1  dum2
       0             1        0
  1    4   0.10   0.20   50.00   5.00   4.0   1.0   2.00   0.0   0.0
  2    6   0.00   1.50  210.00   0.00   0.0   0.0   0.00   0.0   0.0

       0             2        0
       0             3        0
  1    0  -0.30   2.00   20.00   0.00   0.0   0.0   0.00   0.0   0.0
";

    #[test]
    fn splits_blocks_and_drops_empty_ones() {
        let blocks: Vec<_> = LhcoReader::new(Cursor::new(SAMPLE))
            .collect::<StageResult<_>>()
            .unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].ordinal, 0);
        assert_eq!(blocks[0].records.len(), 2);
        assert_eq!(blocks[1].ordinal, 1);
        assert_eq!(blocks[1].records[0].type_code, 0);
    }

    #[test]
    fn records_before_first_marker_form_a_block() {
        let input = "1 4 0.0 0.0 30.0 2.0 3.0 0.0 1.0 0.0 0.0\n";
        let blocks: Vec<_> = LhcoReader::new(Cursor::new(input))
            .collect::<StageResult<_>>()
            .unwrap();
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn only_a_bare_zero_token_marks_an_event() {
        // "0.5" is an object line, so it must be parsed (and fail on arity)
        let input = "0 1 0\n0.5 4 0.0\n";
        let mut reader = LhcoReader::new(Cursor::new(input));
        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(err, StageError::Format { line: 2, .. }));
    }

    #[test]
    fn malformed_line_stops_the_read() {
        let input = "\
0 1 0
1 4 0.0 0.0 30.0 2.0 3.0 0.0 1.0 0.0 0.0
0 2 0
1 4 0.0 x 30.0 2.0 3.0 0.0 1.0 0.0 0.0
0 3 0
1 4 0.0 0.0 30.0 2.0 3.0 0.0 1.0 0.0 0.0
";
        let results: Vec<_> = LhcoReader::new(Cursor::new(input)).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(StageError::Format { line: 4, .. })));
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(LhcoReader::new(Cursor::new("# only a header\n\n")).count(), 0);
    }
}
