//! Response expectations shared by the suites

use std::sync::Arc;

use axum::http::StatusCode;

use crate::domain::ports::RecordCollection;
use crate::domain::request::ActionResponse;
use crate::error::ContractViolation;

pub fn success(response: &ActionResponse) -> Result<(), ContractViolation> {
    if response.is_success() {
        Ok(())
    } else {
        Err(ContractViolation::NotSuccessful(response.status))
    }
}

pub fn status(response: &ActionResponse, expected: StatusCode) -> Result<(), ContractViolation> {
    if response.status == expected {
        Ok(())
    } else {
        Err(ContractViolation::Status {
            expected,
            actual: response.status,
        })
    }
}

pub fn template(response: &ActionResponse, expected: &str) -> Result<(), ContractViolation> {
    if response.template.as_deref() == Some(expected) {
        Ok(())
    } else {
        Err(ContractViolation::Template {
            expected: expected.to_string(),
            actual: response.template.clone(),
        })
    }
}

/// A 3xx response whose `Location` is exactly `expected`
pub fn redirect(response: &ActionResponse, expected: &str) -> Result<(), ContractViolation> {
    if response.is_redirect() && response.redirect_to.as_deref() == Some(expected) {
        Ok(())
    } else {
        Err(ContractViolation::Redirect {
            expected: expected.to_string(),
            actual: response.redirect_to.clone(),
            status: response.status,
        })
    }
}

pub fn body(response: &ActionResponse, expected: &str) -> Result<(), ContractViolation> {
    if response.body == expected {
        Ok(())
    } else {
        Err(ContractViolation::Body {
            expected: expected.to_string(),
            actual: response.body.clone(),
        })
    }
}

/// A non-empty flash notice
pub fn notice(response: &ActionResponse) -> Result<(), ContractViolation> {
    match response.notice.as_deref() {
        Some(notice) if !notice.is_empty() => Ok(()),
        _ => Err(ContractViolation::MissingNotice),
    }
}

/// The view variable `key` holds exactly the `expected` collection object
pub fn assigned_collection(
    response: &ActionResponse,
    key: &str,
    expected: &Arc<dyn RecordCollection>,
) -> Result<(), ContractViolation> {
    match response.assigned(key) {
        Some(assigned) if assigned.is_collection(expected) => Ok(()),
        Some(assigned) => Err(ContractViolation::Assign {
            key: key.to_string(),
            reason: format!("holds a different {} ({:?})", assigned.kind(), assigned),
        }),
        None => Err(ContractViolation::Assign {
            key: key.to_string(),
            reason: format!(
                "not assigned (assigned: {:?})",
                response.assigns.keys().collect::<Vec<_>>()
            ),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::request::{Assigned, Assigns};
    use crate::doubles::{CollectionDouble, ResourceDouble};

    fn response(status: StatusCode) -> ActionResponse {
        ActionResponse {
            status,
            body: String::new(),
            redirect_to: None,
            notice: None,
            template: None,
            assigns: Assigns::new(),
        }
    }

    fn collection() -> Arc<dyn RecordCollection> {
        let record = Arc::new(ResourceDouble::new("Asset", 1, "XML"));
        Arc::new(CollectionDouble::new(vec![record], "XML"))
    }

    #[test]
    fn redirect_needs_3xx_and_exact_location() {
        let mut found = response(StatusCode::FOUND);
        found.redirect_to = Some("/admin/assets".to_string());
        assert!(redirect(&found, "/admin/assets").is_ok());
        assert!(redirect(&found, "/admin/assets/1/edit").is_err());

        let mut ok = response(StatusCode::OK);
        ok.redirect_to = Some("/admin/assets".to_string());
        assert!(redirect(&ok, "/admin/assets").is_err());
    }

    #[test]
    fn notice_must_be_present_and_non_empty() {
        let mut r = response(StatusCode::FOUND);
        assert!(notice(&r).is_err());
        r.notice = Some(String::new());
        assert!(notice(&r).is_err());
        r.notice = Some("Asset was successfully updated.".to_string());
        assert!(notice(&r).is_ok());
    }

    #[test]
    fn status_and_success() {
        let r = response(StatusCode::NOT_FOUND);
        assert!(status(&r, StatusCode::NOT_FOUND).is_ok());
        assert!(matches!(
            success(&r),
            Err(ContractViolation::NotSuccessful(s)) if s == StatusCode::NOT_FOUND
        ));
    }

    #[test]
    fn template_and_body() {
        let mut r = response(StatusCode::OK);
        r.template = Some("edit".to_string());
        r.body = "XML".to_string();

        assert!(template(&r, "edit").is_ok());
        assert!(template(&r, "show").is_err());
        assert!(body(&r, "XML").is_ok());
        assert!(body(&r, "").is_err());
    }

    #[test]
    fn collection_is_compared_by_identity() {
        let expected = collection();
        let lookalike = collection();
        let mut r = response(StatusCode::OK);

        assert!(assigned_collection(&r, "assets", &expected).is_err());

        r.assigns
            .insert("assets".to_string(), Assigned::Collection(lookalike));
        assert!(assigned_collection(&r, "assets", &expected).is_err());

        r.assigns
            .insert("assets".to_string(), Assigned::Collection(expected.clone()));
        assert!(assigned_collection(&r, "assets", &expected).is_ok());
    }
}
