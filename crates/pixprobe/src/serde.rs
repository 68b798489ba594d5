#![cfg(feature = "serde")]

use alloc::format;

use serde::ser::*;

use crate::format::ImageFormat;
use crate::probe::ImageInfo;

impl Serialize for ImageFormat {
    #[allow(clippy::uninlined_format_args)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        // format serialization is simply its debug value
        serializer.serialize_str(&format!("{:?}", self))
    }
}

impl Serialize for ImageInfo {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut info = serializer.serialize_struct("ImageInfo", 4)?;
        info.serialize_field("format", &self.format)?;
        info.serialize_field("width", &self.width)?;
        info.serialize_field("height", &self.height)?;
        info.serialize_field("orientation", &self.orientation)?;
        info.end()
    }
}
