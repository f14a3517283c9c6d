use crate::prelude::{StageError, StageResult};

/// Number of whitespace-separated columns in an LHCO object line.
pub const RECORD_FIELDS: usize = 11;

/// One object line of an LHCO event block, exactly as written by the detector simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub index: i64,
    pub type_code: i64,
    pub eta: f64,
    pub phi: f64,
    pub pt: f64,
    pub mass: f64,
    pub track_count: f64,
    pub btag_flag: f64,
    pub had_em_ratio: f64,
    pub extra1: f64,
    pub extra2: f64,
}

impl RawRecord {
    /// Parses an object line; `line` is the 1-based position used in error reports.
    pub fn parse(text: &str, line: usize) -> StageResult<Self> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() != RECORD_FIELDS {
            return Err(StageError::Format {
                line,
                reason: format!(
                    "expected {} fields, found {}",
                    RECORD_FIELDS,
                    fields.len()
                ),
            });
        }

        let int = |column: usize, name: &str| -> StageResult<i64> {
            fields[column].parse::<i64>().map_err(|_| StageError::Format {
                line,
                reason: format!("{} is not an integer: {:?}", name, fields[column]),
            })
        };
        let float = |column: usize, name: &str| -> StageResult<f64> {
            fields[column].parse::<f64>().map_err(|_| StageError::Format {
                line,
                reason: format!("{} is not a number: {:?}", name, fields[column]),
            })
        };

        Ok(Self {
            index: int(0, "index")?,
            type_code: int(1, "type")?,
            eta: float(2, "eta")?,
            phi: float(3, "phi")?,
            pt: float(4, "pt")?,
            mass: float(5, "mass")?,
            track_count: float(6, "ntrk")?,
            btag_flag: float(7, "btag")?,
            had_em_ratio: float(8, "had/em")?,
            extra1: float(9, "dum1")?,
            extra2: float(10, "dum2")?,
        })
    }

    /// Track count truncated toward zero; its sign carries the lepton charge.
    pub fn track_count(&self) -> i64 {
        self.track_count.trunc() as i64
    }

    pub fn is_btagged(&self) -> bool {
        self.btag_flag.trunc() as i64 != 0
    }
}
