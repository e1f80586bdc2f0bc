//! Dynamic branch prediction.
//!
//! A 1-bit last-outcome predictor with a branch target buffer. Each branch
//! address gets a single history bit in the pattern history table (PHT) and,
//! once taken, a cached target in the branch target buffer (BTB). The
//! predictor flips immediately after one contrary outcome; there is no 2-bit
//! hysteresis, and that behavior is part of the teaching contract.

use std::collections::HashMap;

/// The outcome of a predictor lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prediction {
    /// Whether the branch is predicted taken.
    pub taken: bool,
    /// The predicted next PC: the BTB target when taken, else `pc + 4`.
    pub target: u64,
}

/// One pattern-history-table row in a state snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhtEntry {
    pub pc: u64,
    pub taken: bool,
}

/// One branch-target-buffer row in a state snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BtbEntry {
    pub pc: u64,
    pub target: u64,
}

/// A point-in-time view of the predictor tables, sorted by PC.
#[derive(Clone, Debug, Default)]
pub struct PredictorState {
    pub pht: Vec<PhtEntry>,
    pub btb: Vec<BtbEntry>,
}

/// 1-bit dynamic branch predictor with target caching.
#[derive(Clone, Debug, Default)]
pub struct BranchPredictor {
    pht: HashMap<u64, bool>,
    btb: HashMap<u64, u64>,
}

impl BranchPredictor {
    /// Creates a predictor with empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Predicts the outcome of the branch at `pc`.
    ///
    /// An untracked address defaults to not-taken with target `pc + 4`. A
    /// tracked address returns its history bit and the BTB target, falling
    /// back to `pc + 4` if the taken bit has no BTB entry behind it.
    pub fn predict(&self, pc: u64) -> Prediction {
        match self.pht.get(&pc) {
            Some(&taken) => Prediction {
                taken,
                target: self.btb.get(&pc).copied().unwrap_or(pc + 4),
            },
            None => Prediction {
                taken: false,
                target: pc + 4,
            },
        }
    }

    /// Retrieves the current prediction for `pc` without changing any state.
    ///
    /// Used by Execute to recover what was speculated at Fetch time.
    pub fn get_prediction(&self, pc: u64) -> Prediction {
        self.predict(pc)
    }

    /// Records a speculative entry at Fetch time, as if the prediction were
    /// the outcome. The BTB is touched only for predicted-taken entries.
    pub fn update_entry(&mut self, pc: u64, target: u64, predicted_taken: bool) {
        let _ = self.pht.insert(pc, predicted_taken);
        if predicted_taken {
            let _ = self.btb.insert(pc, target);
        }
    }

    /// Records the actual outcome resolved in Execute.
    ///
    /// The history bit becomes the outcome; the BTB entry is set only when
    /// the branch was taken.
    pub fn update(&mut self, pc: u64, target: u64, taken: bool) {
        let _ = self.pht.insert(pc, taken);
        if taken {
            let _ = self.btb.insert(pc, target);
        }
    }

    /// Snapshots both tables, sorted by PC, for display.
    pub fn state(&self) -> PredictorState {
        let mut pht: Vec<PhtEntry> = self
            .pht
            .iter()
            .map(|(&pc, &taken)| PhtEntry { pc, taken })
            .collect();
        pht.sort_by_key(|e| e.pc);

        let mut btb: Vec<BtbEntry> = self
            .btb
            .iter()
            .map(|(&pc, &target)| BtbEntry { pc, target })
            .collect();
        btb.sort_by_key(|e| e.pc);

        PredictorState { pht, btb }
    }
}
