use crate::{PAYMENT_QUERY_KEY, PAYMENT_QUERY_SUCCESS};

pub enum ApiRoute {
    MediaUpload,
    RecordInsert,
}

impl ApiRoute {
    fn path(&self) -> &'static str {
        match self {
            ApiRoute::MediaUpload => "image/upload",
            ApiRoute::RecordInsert => "rest/v1",
        }
    }

    /// `scope` is the cloud name for uploads and the table name for inserts.
    pub fn target_raw(&self, base: impl AsRef<str>, scope: impl AsRef<str>) -> String {
        let base = base.as_ref().trim_end_matches('/');
        match self {
            ApiRoute::MediaUpload => format!("{}/v1_1/{}/{}", base, scope.as_ref(), self.path()),
            ApiRoute::RecordInsert => format!("{}/{}/{}", base, self.path(), scope.as_ref()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Page {
    Payment,
    Landing { payment_success: bool },
}

impl Page {
    pub fn href(&self) -> String {
        match self {
            Page::Payment => "payment.html".to_string(),
            Page::Landing {
                payment_success: true,
            } => format!("index.html?{}={}", PAYMENT_QUERY_KEY, PAYMENT_QUERY_SUCCESS),
            Page::Landing {
                payment_success: false,
            } => "index.html".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiRoute, Page};

    #[test]
    pub fn test_targets() {
        assert_eq!(
            "https://api.cloudinary.com/v1_1/demo/image/upload",
            ApiRoute::MediaUpload.target_raw("https://api.cloudinary.com/", "demo")
        );
        assert_eq!(
            "https://x.supabase.co/rest/v1/AstroCareersDataTable",
            ApiRoute::RecordInsert.target_raw("https://x.supabase.co", "AstroCareersDataTable")
        );
    }

    #[test]
    pub fn test_page_href() {
        assert_eq!("payment.html", Page::Payment.href());
        assert_eq!(
            "index.html?payment=success",
            Page::Landing {
                payment_success: true
            }
            .href()
        );
    }
}
