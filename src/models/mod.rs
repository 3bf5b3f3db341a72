//! Typed content models for the site sections.
//!
//! Every remote document is validated into one of these structs at the
//! cache boundary before it reaches the renderer. Fields the editor may
//! leave blank are `Option` or default to an empty string, so a partially
//! filled document never fails the whole section load.

pub mod faq;
pub mod gallery;
pub mod notice;
pub mod people;
pub mod settings;

pub use faq::FaqEntry;
pub use gallery::GalleryImage;
pub use notice::{Notice, NoticeCategory};
pub use people::{FacultyMember, Testimonial};
pub use settings::{
    AboutSettings, AcademicsSettings, ContactSettings, HeroSettings, Highlight, LeaderProfile,
    LogoSettings, SchoolInfo,
};
