//! The remote analysis service as seen by the controller.

use async_trait::async_trait;

use crate::analysis::model::{AnalysisRequest, AnalysisResponse, FormatResponse, ShareResponse};
use crate::error::CodeScopeResult;

/// One method per endpoint.
///
/// `analyze` returns `Ok` whenever a body decodes, including bodies that carry
/// an `error` field; interpreting that field is the caller's job. `format`
/// fails on any non-2xx status.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> CodeScopeResult<AnalysisResponse>;

    async fn format(&self, request: &AnalysisRequest) -> CodeScopeResult<FormatResponse>;

    async fn share(&self, request: &AnalysisRequest) -> CodeScopeResult<ShareResponse>;
}
