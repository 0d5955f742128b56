use image::RgbImage;

use crate::SilhouetteResult;

/// A trait representing an algorithm that can turn a background-stripped
/// image into a vector representation.
pub trait ImageVectorizer {
    type Options;
    type Output;

    fn vectorize(
        &self,
        image: &RgbImage,
        options: &Self::Options,
    ) -> SilhouetteResult<Self::Output>;
}

pub mod trace;
