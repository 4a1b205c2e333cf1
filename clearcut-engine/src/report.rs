//! Pair rows exchanged between the overlap-checking and imprinting stages.

/// The reported class of a non-distinct pair.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PairClass {
    /// contact without shared volume
    Touch,
    /// shared volume within the accepted ratio
    Overlap,
    /// shared volume beyond the accepted ratio of the smaller solid
    BadOverlap,
}

/// free-function conversion for the CSV surface and the logs
pub fn class_name(class: PairClass) -> &'static str {
    match class {
        PairClass::Touch => "touch",
        PairClass::Overlap => "overlap",
        PairClass::BadOverlap => "bad_overlap",
    }
}

impl PairClass {
    /// Parses the CSV spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "touch" => Some(PairClass::Touch),
            "overlap" => Some(PairClass::Overlap),
            "bad_overlap" => Some(PairClass::BadOverlap),
            _ => None,
        }
    }

    /// Returns whether the imprinter consumes rows of this class.
    pub fn is_overlap(self) -> bool {
        matches!(self, PairClass::Overlap | PairClass::BadOverlap)
    }
}

/// One row of a pair list: the pair, its class, and the volumes for overlap
/// classes.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PairRow {
    /// smaller ordinal of the pair
    pub i: usize,
    /// larger ordinal of the pair
    pub j: usize,
    /// the reported class
    pub class: PairClass,
    /// `(vol_common, vol_i, vol_j)`, present for the overlap classes
    pub volumes: Option<(f64, f64, f64)>,
}
