use crate::api::RequestBody;
use crate::error::ApiResult;
use crate::methods::Method;
use crate::types::User;

/// `getMe` — basic information about the bot account behind the token.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetMe;

impl Method for GetMe {
    const NAME: &'static str = "getMe";
    type Response = User;

    fn body(&self) -> ApiResult<RequestBody> {
        Ok(RequestBody::Empty)
    }
}
