// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! Implementation of methods for three-dimensional vector.

use std::ops::{Deref, DerefMut};

use nalgebra::base::Vector3;

/// Position of a point in space or a translation vector. Implemented using `nalgebra`'s Vector3.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Vector3D(pub(crate) Vector3<f32>);

impl From<[f32; 3]> for Vector3D {
    #[inline]
    fn from(arr: [f32; 3]) -> Self {
        Vector3D(Vector3::new(arr[0], arr[1], arr[2]))
    }
}

impl From<Vector3D> for [f32; 3] {
    #[inline]
    fn from(vec: Vector3D) -> Self {
        [vec.0.x, vec.0.y, vec.0.z]
    }
}

/// Allows accessing fields of `Vector3D` as `.x`, `.y`, and `.z`.
pub struct Vector3Raw {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Deref for Vector3D {
    type Target = Vector3Raw;

    #[inline]
    fn deref(&self) -> &Self::Target {
        unsafe { &*(self.0.as_ptr() as *const Vector3Raw) }
    }
}

impl DerefMut for Vector3D {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { &mut *(self.0.as_mut_ptr() as *mut Vector3Raw) }
    }
}

impl Vector3D {
    /// Create a new `Vector3D` structure.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Vector3D(Vector3::new(x, y, z))
    }

    /// Create a vector with all three components equal to `value`.
    ///
    /// ## Example
    /// ```
    /// # use gro_rs::prelude::*;
    /// #
    /// let half_box = Vector3D::splat(-2.0);
    /// assert_eq!(half_box, Vector3D::new(-2.0, -2.0, -2.0));
    /// ```
    #[inline]
    pub fn splat(value: f32) -> Self {
        Vector3D(Vector3::repeat(value))
    }

    /// Translate the point by the provided vector.
    ///
    /// ## Example
    /// ```
    /// # use gro_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let mut point = Vector3D::new(1.0, 2.0, 3.0);
    /// point.translate(&Vector3D::new(-0.5, 0.5, 1.5));
    ///
    /// assert_approx_eq!(f32, point.x, 0.5);
    /// assert_approx_eq!(f32, point.y, 2.5);
    /// assert_approx_eq!(f32, point.z, 4.5);
    /// ```
    #[inline]
    pub fn translate(&mut self, vector: &Vector3D) {
        self.0 += vector.0;
    }

    /// Returns `true` if all components of the vector lie within `[min, max]`.
    #[inline]
    pub fn is_within(&self, min: f32, max: f32) -> bool {
        self.0.iter().all(|&c| c >= min && c <= max)
    }
}

impl Default for Vector3D {
    /// Create a zero vector.
    fn default() -> Self {
        Vector3D(Vector3::new(0.0, 0.0, 0.0))
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn from_array() {
        let vec = Vector3D::from([1.5, -2.5, 3.25]);
        assert_eq!(vec.x, 1.5);
        assert_eq!(vec.y, -2.5);
        assert_eq!(vec.z, 3.25);

        let arr: [f32; 3] = vec.into();
        assert_eq!(arr, [1.5, -2.5, 3.25]);
    }

    #[test]
    fn translate() {
        let mut vec = Vector3D::new(4.3, 5.6, 1.2);
        vec.translate(&Vector3D::splat(-2.0));

        assert_approx_eq!(f32, vec.x, 2.3);
        assert_approx_eq!(f32, vec.y, 3.6);
        assert_approx_eq!(f32, vec.z, -0.8);
    }

    #[test]
    fn deref_mut() {
        let mut vec = Vector3D::default();
        vec.y = 7.0;
        assert_eq!(vec, Vector3D::new(0.0, 7.0, 0.0));
    }

    #[test]
    fn within() {
        let vec = Vector3D::new(-999.5, 0.0, 9998.0);
        assert!(vec.is_within(-1000.0, 9999.0));
        assert!(!vec.is_within(-999.0, 9999.0));
        assert!(!vec.is_within(-1000.0, 9997.0));
    }
}
