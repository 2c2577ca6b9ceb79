//! Cohort state carried from one projection year to the next

use super::engine::CohortModel;

/// Breeding and young cohort sizes at a single period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CohortState {
    pub breeding: f64,
    pub young: f64,
}

impl CohortState {
    pub fn new(breeding: f64, young: f64) -> Self {
        Self { breeding, young }
    }

    pub fn total(&self) -> f64 {
        self.breeding + self.young
    }

    /// Advance one year
    ///
    /// Fibonacci:
    ///   B' = B + C * Y   (maturing young join the breeders)
    ///   Y' = m * B       (breeders produce new young)
    ///
    /// Survival adjusted (C = calves per breeder, m = mortality):
    ///   B' = (B + Y) * (1 - m)
    ///   Y' = C * B * (1 - m)
    pub fn advance(&self, model: CohortModel, c: f64, m: f64) -> Self {
        match model {
            CohortModel::Fibonacci => Self {
                breeding: self.breeding + c * self.young,
                young: m * self.breeding,
            },
            CohortModel::SurvivalAdjusted => {
                let survival = 1.0 - m;
                Self {
                    breeding: (self.breeding + self.young) * survival,
                    young: c * self.breeding * survival,
                }
            }
        }
    }

    /// Round both cohorts to whole animals, ties to the even neighbour
    pub fn rounded(&self) -> Self {
        Self {
            breeding: self.breeding.round_ties_even(),
            young: self.young.round_ties_even(),
        }
    }
}
