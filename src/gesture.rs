/**
 * Gesture data model
 * Captured strokes as they arrive from the drawing surface
 */

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GestureError;

/// A point on the capture plane, in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One freehand drawing attempt: points paired with millisecond timestamps.
///
/// Always holds at least one point and exactly one timestamp per point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CapturePayload", into = "CapturePayload")]
pub struct GestureRecord {
    points: Vec<Point>,
    timestamps: Vec<u64>,
}

impl GestureRecord {
    pub fn new(points: Vec<Point>, timestamps: Vec<u64>) -> Result<Self, GestureError> {
        if points.is_empty() {
            return Err(GestureError::Empty);
        }
        if points.len() != timestamps.len() {
            return Err(GestureError::LengthMismatch {
                points: points.len(),
                timestamps: timestamps.len(),
            });
        }
        Ok(Self { points, timestamps })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn timestamps(&self) -> &[u64] {
        &self.timestamps
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed record.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Wire shape of a capture, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapturePayload {
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default)]
    pub timestamps: Vec<u64>,
}

impl TryFrom<CapturePayload> for GestureRecord {
    type Error = GestureError;

    fn try_from(payload: CapturePayload) -> Result<Self, Self::Error> {
        GestureRecord::new(payload.points, payload.timestamps)
    }
}

impl From<GestureRecord> for CapturePayload {
    fn from(record: GestureRecord) -> Self {
        Self {
            points: record.points,
            timestamps: record.timestamps,
        }
    }
}

/// A gesture that may or may not have been supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Present(GestureRecord),
    Absent,
}

impl Gesture {
    /// Builds a gesture from raw capture data. Anything that fails validation
    /// becomes `Absent` so comparison can still produce a result.
    pub fn from_capture(points: Vec<Point>, timestamps: Vec<u64>) -> Self {
        match GestureRecord::new(points, timestamps) {
            Ok(record) => Gesture::Present(record),
            Err(e) => {
                debug!("Discarding unusable capture: {}", e);
                Gesture::Absent
            }
        }
    }

    pub fn as_record(&self) -> Option<&GestureRecord> {
        match self {
            Gesture::Present(record) => Some(record),
            Gesture::Absent => None,
        }
    }
}

impl From<GestureRecord> for Gesture {
    fn from(record: GestureRecord) -> Self {
        Gesture::Present(record)
    }
}

impl From<Option<CapturePayload>> for Gesture {
    fn from(payload: Option<CapturePayload>) -> Self {
        match payload {
            Some(p) => Gesture::from_capture(p.points, p.timestamps),
            None => Gesture::Absent,
        }
    }
}

/// Points rescaled into the canonical bounding frame.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedGesture {
    pub(crate) points: Vec<Point>,
}

impl NormalizedGesture {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
