//! Pipeline Module
//!
//! The narrow interface an image-loading pipeline uses to store decoded
//! images: a capability trait, an injected sizing function and the decoded
//! image payload itself.
//!
//! There is no global cache instance; the owner constructs an
//! [`ImageCache`] and hands it to whatever needs it.

mod image;
mod sized;

pub use image::{AllocationSizer, DecodedImage, PixelFormat};
pub use sized::{ByteSizer, ImageStore, SizedCache};

/// The cache used for decoded images, sized by allocation.
pub type ImageCache<C = crate::cache::SystemClock> = SizedCache<DecodedImage, AllocationSizer, C>;
