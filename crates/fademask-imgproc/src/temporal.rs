use fademask_image::{ImageError, Plane};

use crate::combine;

/// Sample-wise maximum of three planes of the same size.
///
/// Used to merge a frame's mask with the masks of the frames it borrows from.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the planes differ in size.
pub fn max3(a: &Plane, b: &Plane, c: &Plane) -> Result<Plane, ImageError> {
    combine::combine3(a, b, c, |x, y, z| x.max(y).max(z))
}
