// Direct confirmation measures — closed-form formulas over subset probabilities.
//
// For a segment S and condition C, P(S,C) is the probability of the joint
// subset S|C, i.e. all words of S and C in one context. Logarithmic measures
// add the smoothing constant inside the log; ratio measures return a fixed
// floor when their denominator is zero.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoherenceError;
use crate::subsets::{subset_size, submasks, SubsetDefinition, SubsetId, SubsetIdSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirectMeasure {
    /// P(S,C) / P(C)
    CondProb,
    /// ln((P(S,C) + ε) / P(C)), the UMass measure.
    LogCondProb,
    /// ln(P(S,C) / (P(S)·P(C)) + ε), pointwise mutual information.
    LogRatio,
    /// Log ratio normalized by −ln(P(S,C) + ε) into [-1, 1].
    NormalizedLogRatio,
    /// P(S|C) − P(S)
    Difference,
    /// P(S,C) / P(S or C)
    Jaccard,
    /// 2·P(S,C) / (P(S) + P(C))
    Dice,
    /// P(all words of S∪C) / P(any word of S∪C)
    Olsson,
    /// (P(S|C) − P(S|¬C)) / (P(S|C) + P(S|¬C))
    Fitelson,
}

impl DirectMeasure {
    pub const ALL: [DirectMeasure; 9] = [
        DirectMeasure::CondProb,
        DirectMeasure::LogCondProb,
        DirectMeasure::LogRatio,
        DirectMeasure::NormalizedLogRatio,
        DirectMeasure::Difference,
        DirectMeasure::Jaccard,
        DirectMeasure::Dice,
        DirectMeasure::Olsson,
        DirectMeasure::Fitelson,
    ];

    /// Short identifier, as used inside vector measure names (`V_nlr(1)`).
    pub fn short_name(&self) -> &'static str {
        match self {
            DirectMeasure::CondProb => "c",
            DirectMeasure::LogCondProb => "lc",
            DirectMeasure::LogRatio => "lr",
            DirectMeasure::NormalizedLogRatio => "nlr",
            DirectMeasure::Difference => "d",
            DirectMeasure::Jaccard => "j",
            DirectMeasure::Dice => "dice",
            DirectMeasure::Olsson => "o",
            DirectMeasure::Fitelson => "f",
        }
    }

    pub fn name(&self) -> String {
        format!("m_{}", self.short_name())
    }

    /// Confirmation of segment `s` by condition `c`.
    ///
    /// `p` is indexed by subset id and must hold every subset this measure
    /// declared in `extend_needed`.
    pub fn confirm<P>(&self, p: &P, s: SubsetId, c: SubsetId, epsilon: f64) -> f64
    where
        P: Index<SubsetId, Output = f64> + ?Sized,
    {
        let p_s = p[s];
        let p_c = p[c];
        let p_sc = p[s | c];

        match self {
            DirectMeasure::CondProb => conditional(p_sc, p_c),
            DirectMeasure::LogCondProb => {
                if p_c > 0.0 {
                    ((p_sc + epsilon) / p_c).ln()
                } else {
                    epsilon.ln()
                }
            }
            DirectMeasure::LogRatio => log_ratio(p_s, p_c, p_sc, epsilon),
            DirectMeasure::NormalizedLogRatio => {
                if p_s * p_c <= 0.0 {
                    return -1.0;
                }
                let normalizer = -(p_sc + epsilon).ln();
                if normalizer <= 0.0 {
                    // The words occur in every context.
                    return 1.0;
                }
                log_ratio(p_s, p_c, p_sc, epsilon) / normalizer
            }
            DirectMeasure::Difference => conditional(p_sc, p_c) - p_s,
            DirectMeasure::Jaccard => {
                let either = p_s + p_c - p_sc;
                if either > 0.0 {
                    p_sc / either
                } else {
                    0.0
                }
            }
            DirectMeasure::Dice => {
                let sum = p_s + p_c;
                if sum > 0.0 {
                    2.0 * p_sc / sum
                } else {
                    0.0
                }
            }
            DirectMeasure::Olsson => {
                let joint = s | c;
                let any = union_probability(p, joint);
                if any > 0.0 {
                    p[joint] / any
                } else {
                    0.0
                }
            }
            DirectMeasure::Fitelson => {
                let given_c = conditional(p_sc, p_c);
                let given_not_c = if p_c < 1.0 {
                    (p_s - p_sc) / (1.0 - p_c)
                } else {
                    0.0
                };
                let sum = given_c + given_not_c;
                if sum > 0.0 {
                    (given_c - given_not_c) / sum
                } else {
                    0.0
                }
            }
        }
    }

    /// Add the subsets this measure reads beyond the definition's own
    /// segments, conditions and joint masks.
    pub fn extend_needed(&self, definition: &SubsetDefinition, needed: &mut SubsetIdSet) {
        if *self == DirectMeasure::Olsson {
            for (s, c) in definition.pairs() {
                for sub in submasks(s | c) {
                    needed.set(sub, true);
                }
            }
        }
    }
}

fn conditional(p_joint: f64, p_given: f64) -> f64 {
    if p_given > 0.0 {
        p_joint / p_given
    } else {
        0.0
    }
}

fn log_ratio(p_s: f64, p_c: f64, p_sc: f64, epsilon: f64) -> f64 {
    let independent = p_s * p_c;
    if independent > 0.0 {
        (p_sc / independent + epsilon).ln()
    } else {
        epsilon.ln()
    }
}

/// P(at least one word of `mask`) by inclusion–exclusion over its sub-masks.
fn union_probability<P>(p: &P, mask: SubsetId) -> f64
where
    P: Index<SubsetId, Output = f64> + ?Sized,
{
    submasks(mask)
        .map(|sub| {
            if subset_size(sub) % 2 == 1 {
                p[sub]
            } else {
                -p[sub]
            }
        })
        .sum()
}

impl fmt::Display for DirectMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m_{}", self.short_name())
    }
}

impl FromStr for DirectMeasure {
    type Err = CoherenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let key = key.strip_prefix("m_").unwrap_or(&key);
        let measure = match key {
            "c" | "condprob" | "cond-prob" => DirectMeasure::CondProb,
            "lc" | "logcondprob" | "log-cond-prob" | "umass" => DirectMeasure::LogCondProb,
            "lr" | "logratio" | "log-ratio" | "pmi" => DirectMeasure::LogRatio,
            "nlr" | "npmi" | "normalized-log-ratio" => DirectMeasure::NormalizedLogRatio,
            "d" | "difference" => DirectMeasure::Difference,
            "j" | "jaccard" => DirectMeasure::Jaccard,
            "dice" => DirectMeasure::Dice,
            "o" | "olsson" => DirectMeasure::Olsson,
            "f" | "fitelson" => DirectMeasure::Fitelson,
            _ => {
                return Err(CoherenceError::UnknownStrategy {
                    kind: "confirmation measure",
                    name: s.to_string(),
                })
            }
        };
        Ok(measure)
    }
}
