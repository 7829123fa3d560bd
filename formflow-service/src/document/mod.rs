//! Document rendering: format content plus completion data, wrapped in an
//! HTML shell and converted to PDF.

pub mod converter;
pub mod html;

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use formflow_api::{ApiError, ApiResult, Requester, WorkflowStatus};
use formflow_db::models::{CompletionModel, FormatModel, UserModel, ValidationModel};
use tracing::{error, info};
use uuid::Uuid;

pub use converter::{ConversionError, HtmlToPdf, PageOptions, WkhtmltopdfConverter};
pub use html::ValidationFooter;

use crate::error::StoreResultExt;
use crate::template;
use crate::Repositories;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Everything a validated document prints.
struct Approval {
    validation: ValidationModel,
    owner: UserModel,
    validator: UserModel,
}

pub struct DocumentService {
    repos: Repositories,
    converter: Arc<dyn HtmlToPdf>,
    page: PageOptions,
}

impl DocumentService {
    pub fn new(repos: Repositories, converter: Arc<dyn HtmlToPdf>, page: PageOptions) -> Self {
        Self {
            repos,
            converter,
            page,
        }
    }

    /// Plain preview of any completion the requester may read.
    pub async fn preview_base64(&self, requester: &Requester, completion_id: Uuid) -> ApiResult<String> {
        let (completion, format) = self.load_readable(requester, completion_id).await?;
        let html = html::document_html(&format.title, &template::render(&format.content, &completion.data));
        let bytes = self.convert(&html).await?;
        Ok(STANDARD.encode(bytes))
    }

    /// Validated preview when the completion is approved, plain preview otherwise.
    pub async fn preview_validated_base64(&self, requester: &Requester, completion_id: Uuid) -> ApiResult<String> {
        let (completion, format) = self.load_readable(requester, completion_id).await?;

        let approval = if completion.status == WorkflowStatus::Approved {
            self.load_approval(&completion).await?
        } else {
            None
        };

        let html = self.html_for(&format, &completion, approval.as_ref());
        let bytes = self.convert(&html).await?;
        Ok(STANDARD.encode(bytes))
    }

    /// The validated document as an attachment. Only approved completions
    /// with a recorded validation can be downloaded.
    pub async fn download(&self, requester: &Requester, completion_id: Uuid) -> ApiResult<RenderedDocument> {
        let (completion, format) = self.load_readable(requester, completion_id).await?;

        if completion.status != WorkflowStatus::Approved {
            return Err(ApiError::NotApproved(
                "the document must be approved before it can be downloaded".into(),
            ));
        }
        let approval = self.load_approval(&completion).await?.ok_or_else(|| {
            ApiError::NotApproved(format!("completion {completion_id} has no validation record"))
        })?;

        let html = self.html_for(&format, &completion, Some(&approval));
        let bytes = self.convert(&html).await?;
        info!(completion_id = %completion_id, requester = %requester.id, "document downloaded");

        Ok(RenderedDocument {
            filename: format!("format_{completion_id}.pdf"),
            content_type: PDF_CONTENT_TYPE,
            bytes,
        })
    }

    /// Owner or reviewer access to an existing completion and its format.
    async fn load_readable(
        &self,
        requester: &Requester,
        completion_id: Uuid,
    ) -> ApiResult<(CompletionModel, FormatModel)> {
        let completion = self
            .repos
            .completions
            .load(completion_id)
            .await
            .or_dependency_failure("load completion")?
            .ok_or_else(|| ApiError::not_found("completion", completion_id))?;

        if completion.owner_id != requester.id && !requester.is_reviewer() {
            return Err(ApiError::Forbidden(
                "only the owner or a reviewer may read this document".into(),
            ));
        }

        let format = self
            .repos
            .formats
            .load(completion.format_id)
            .await
            .or_dependency_failure("load format")?
            .ok_or_else(|| ApiError::not_found("format", completion.format_id))?;

        Ok((completion, format))
    }

    /// `None` when no validation row exists. Missing owner or validator
    /// accounts are `NotFound`.
    async fn load_approval(&self, completion: &CompletionModel) -> ApiResult<Option<Approval>> {
        let Some(validation) = self
            .repos
            .validations
            .find_by_completion_id(completion.id)
            .await
            .or_dependency_failure("load validation")?
        else {
            return Ok(None);
        };

        let owner = self.load_user(completion.owner_id).await?;
        let validator = self.load_user(validation.validator_id).await?;
        Ok(Some(Approval {
            validation,
            owner,
            validator,
        }))
    }

    async fn load_user(&self, id: Uuid) -> ApiResult<UserModel> {
        self.repos
            .users
            .load(id)
            .await
            .or_dependency_failure("load user")?
            .ok_or_else(|| ApiError::not_found("user", id))
    }

    fn html_for(&self, format: &FormatModel, completion: &CompletionModel, approval: Option<&Approval>) -> String {
        let content = template::render(&format.content, &completion.data);
        match approval {
            Some(approval) => html::validated_document_html(
                &format.title,
                &content,
                &ValidationFooter {
                    owner_name: &approval.owner.name,
                    validator_name: &approval.validator.name,
                    decided_at: approval.validation.updated_at,
                    notes: approval.validation.notes.as_deref(),
                },
            ),
            None => html::document_html(&format.title, &content),
        }
    }

    async fn convert(&self, html: &str) -> ApiResult<Vec<u8>> {
        self.converter.convert(html, &self.page).await.map_err(|err| {
            error!(error = %err, "document conversion failed");
            ApiError::DependencyFailure("document conversion failed".into())
        })
    }
}
