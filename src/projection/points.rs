//! Projection output rows

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// One projected year
///
/// Period 0 is the supplied initial state; periods 1..=horizon are produced
/// by the recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    #[serde(rename = "Year")]
    pub period: u32,
    #[serde(rename = "Breeders")]
    pub breeding: f64,
    #[serde(rename = "Juveniles")]
    pub young: f64,
    #[serde(rename = "Total")]
    pub total: f64,
}

impl ProjectionPoint {
    pub fn new(period: u32, breeding: f64, young: f64) -> Self {
        Self {
            period,
            breeding,
            young,
            total: breeding + young,
        }
    }
}

/// Write points as CSV with a `Year,Breeders,Juveniles,Total` header
pub fn write_points_csv<W: Write>(writer: W, points: &[ProjectionPoint]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for point in points {
        wtr.serialize(point)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_sum() {
        let p = ProjectionPoint::new(2, 3.25, 1.5);
        assert_eq!(p.total, 4.75);
    }

    #[test]
    fn test_csv_layout() {
        let points = vec![ProjectionPoint::new(0, 1.0, 1.0), ProjectionPoint::new(1, 2.0, 1.0)];
        let mut buf = Vec::new();
        write_points_csv(&mut buf, &points).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Year,Breeders,Juveniles,Total"));
        assert_eq!(lines.next(), Some("0,1.0,1.0,2.0"));
        assert_eq!(lines.next(), Some("1,2.0,1.0,3.0"));
    }
}
