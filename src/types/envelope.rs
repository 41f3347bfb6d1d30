use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// `status` / `message` pair present on every reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ResponseStatus {
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() != Some("fail")
    }
}

/// A typed reply body.
pub trait ApiResponse: DeserializeOwned {
    fn envelope(&self) -> &ResponseStatus;
}

/// Declares a response struct that flattens in the common envelope.
macro_rules! response {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                pub $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            #[serde(flatten)]
            pub envelope: $crate::types::envelope::ResponseStatus,
            $(
                $(#[$fmeta])*
                #[serde(default)]
                pub $field: $ty,
            )*
        }

        impl $crate::types::envelope::ApiResponse for $name {
            fn envelope(&self) -> &$crate::types::envelope::ResponseStatus {
                &self.envelope
            }
        }
    };
}

pub(crate) use response;
