//! Wire types shared between the ArtisanAI engine and its clients.

pub mod requests;
pub mod responses;
pub mod share_link;

pub use requests::{ImageUploadRequest, SettingRequest, TextMessageRequest};
pub use responses::{EventOutcome, MessageDto, SessionSnapshot, StorefrontView};
pub use share_link::{decode_storefront, encode_storefront, storefront_path, ShareLinkError};
