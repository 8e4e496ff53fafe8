//! # Product Flag Families
//!
//! Three independent families. Bit values repeat across families (bit 0 is
//! `TRASH` on a product but `ORIGINAL` on a URL); a `Bitfield` is always
//! bound to exactly one family.

use crate::flag_family;

flag_family! {
    /// Flags on a [`Product`](crate::entities::Product).
    pub enum ProductFlag("product") {
        /// Low-quality listing.
        Trash = 1 << 0 => "TRASH",
        /// Sold by a third-party reseller.
        Thirdparty = 1 << 1 => "THIRDPARTY",
        /// The product stays in the library after claiming.
        Permanent = 1 << 2 => "PERMANENT",
        StaffPick = 1 << 3 => "STAFF_PICK",
        FirstpartyExclusive = 1 << 4 => "FIRSTPARTY_EXCLUSIVE",
    }
}

flag_family! {
    /// Flags on a [`ProductUrl`](crate::entities::ProductUrl).
    pub enum ProductUrlFlag("product-url") {
        /// The store's own URL.
        Original = 1 << 0 => "ORIGINAL",
        Proxied = 1 << 1 => "PROXIED",
        Tracking = 1 << 2 => "TRACKING",
        OpensInBrowser = 1 << 3 => "OPENS_IN_BROWSER",
        OpensInClient = 1 << 4 => "OPENS_IN_CLIENT",
    }
}

flag_family! {
    /// Flags on a [`ProductImage`](crate::entities::ProductImage).
    ///
    /// `AR_*` is the aspect ratio, `TP_*` the image type and `FT_*` overlay
    /// features.
    pub enum ProductImageFlag("product-image") {
        Proxied = 1 << 0 => "PROXIED",
        ArWide = 1 << 1 => "AR_WIDE",
        ArSquare = 1 << 2 => "AR_SQUARE",
        ArTall = 1 << 3 => "AR_TALL",
        TpPromo = 1 << 4 => "TP_PROMO",
        TpLogo = 1 << 5 => "TP_LOGO",
        TpShowcase = 1 << 6 => "TP_SHOWCASE",
        TpOther = 1 << 7 => "TP_OTHER",
        FtWatermark = 1 << 8 => "FT_WATERMARK",
        FtTags = 1 << 9 => "FT_TAGS",
    }
}
