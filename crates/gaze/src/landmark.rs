//! Eye landmarks and the horizontal gaze ratio

use crate::GazeError;
use serde::{Deserialize, Serialize};

/// FaceMesh indices (with iris refinement) for the six eye landmarks
pub mod face_mesh {
    pub const LEFT_EYE_OUTER: usize = 33;
    pub const LEFT_EYE_INNER: usize = 133;
    pub const LEFT_IRIS_CENTER: usize = 468;
    pub const RIGHT_EYE_OUTER: usize = 362;
    pub const RIGHT_EYE_INNER: usize = 263;
    pub const RIGHT_IRIS_CENTER: usize = 473;

    /// Minimum mesh length that contains every index above
    pub const REQUIRED_LEN: usize = RIGHT_IRIS_CENTER + 1;
}

/// Normalized 2D image point
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Landmarks of a single eye
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EyeLandmarks {
    /// Corner towards the ear
    pub outer: Point2,
    /// Corner towards the nose
    pub inner: Point2,
    /// Iris center
    pub center: Point2,
}

impl EyeLandmarks {
    pub fn new(outer: Point2, inner: Point2, center: Point2) -> Self {
        Self { outer, inner, center }
    }

    /// Horizontal position of the iris between the corners.
    ///
    /// 0.0 sits on the outer corner, 1.0 on the inner corner.
    pub fn gaze_ratio(&self) -> Result<f32, GazeError> {
        let span = self.inner.x - self.outer.x;
        if span == 0.0 {
            return Err(GazeError::DegenerateGeometry(self.outer.x));
        }

        let ratio = (self.center.x - self.outer.x) / span;
        if !ratio.is_finite() {
            return Err(GazeError::NonFiniteRatio(ratio));
        }
        Ok(ratio)
    }
}

/// Landmarks for one detected face in one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    pub left_eye: EyeLandmarks,
    pub right_eye: EyeLandmarks,
}

impl LandmarkFrame {
    pub fn new(left_eye: EyeLandmarks, right_eye: EyeLandmarks) -> Self {
        Self { left_eye, right_eye }
    }

    /// Pick the eye landmarks out of a full FaceMesh result
    pub fn from_face_mesh(mesh: &[Point2]) -> Result<Self, GazeError> {
        use self::face_mesh::*;

        if mesh.len() < REQUIRED_LEN {
            return Err(GazeError::LandmarksMissing {
                required: REQUIRED_LEN,
                actual: mesh.len(),
            });
        }

        Ok(Self {
            left_eye: EyeLandmarks::new(
                mesh[LEFT_EYE_OUTER],
                mesh[LEFT_EYE_INNER],
                mesh[LEFT_IRIS_CENTER],
            ),
            right_eye: EyeLandmarks::new(
                mesh[RIGHT_EYE_OUTER],
                mesh[RIGHT_EYE_INNER],
                mesh[RIGHT_IRIS_CENTER],
            ),
        })
    }

    /// Mean of both eyes' gaze ratios
    pub fn avg_gaze_ratio(&self) -> Result<f32, GazeError> {
        let left = self.left_eye.gaze_ratio()?;
        let right = self.right_eye.gaze_ratio()?;
        Ok((left + right) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eye(outer: f32, inner: f32, center: f32) -> EyeLandmarks {
        EyeLandmarks::new(
            Point2::new(outer, 0.5),
            Point2::new(inner, 0.5),
            Point2::new(center, 0.5),
        )
    }

    #[test]
    fn test_gaze_ratio() {
        assert!((eye(0.2, 0.4, 0.3).gaze_ratio().unwrap() - 0.5).abs() < 1e-5);
        // Right eye corners are mirrored, ratio still runs outer -> inner
        assert!((eye(0.8, 0.6, 0.75).gaze_ratio().unwrap() - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_avg_gaze_ratio() {
        let frame = LandmarkFrame::new(eye(0.0, 1.0, 0.2), eye(0.0, 1.0, 0.4));
        assert!((frame.avg_gaze_ratio().unwrap() - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_geometry() {
        let frame = LandmarkFrame::new(eye(0.3, 0.3, 0.3), eye(0.0, 1.0, 0.5));
        assert_eq!(
            frame.avg_gaze_ratio(),
            Err(GazeError::DegenerateGeometry(0.3))
        );
    }

    #[test]
    fn test_non_finite_ratio() {
        let frame = LandmarkFrame::new(eye(0.0, 1.0, f32::NAN), eye(0.0, 1.0, 0.5));
        assert!(matches!(
            frame.avg_gaze_ratio(),
            Err(GazeError::NonFiniteRatio(_))
        ));
    }

    #[test]
    fn test_from_face_mesh() {
        let mut mesh = vec![Point2::default(); face_mesh::REQUIRED_LEN];
        mesh[face_mesh::LEFT_EYE_OUTER] = Point2::new(0.1, 0.0);
        mesh[face_mesh::LEFT_EYE_INNER] = Point2::new(0.3, 0.0);
        mesh[face_mesh::LEFT_IRIS_CENTER] = Point2::new(0.2, 0.0);
        mesh[face_mesh::RIGHT_EYE_OUTER] = Point2::new(0.9, 0.0);
        mesh[face_mesh::RIGHT_EYE_INNER] = Point2::new(0.7, 0.0);
        mesh[face_mesh::RIGHT_IRIS_CENTER] = Point2::new(0.8, 0.0);

        let frame = LandmarkFrame::from_face_mesh(&mesh).unwrap();
        assert!((frame.avg_gaze_ratio().unwrap() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_from_short_face_mesh() {
        let mesh = vec![Point2::default(); 468];
        assert_eq!(
            LandmarkFrame::from_face_mesh(&mesh),
            Err(GazeError::LandmarksMissing { required: 474, actual: 468 })
        );
    }
}
