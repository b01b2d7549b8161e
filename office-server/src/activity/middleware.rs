//! 审计中间件
//!
//! 自动记录 `/api` 下成功 (2xx) 的写请求：POST → CREATE，
//! PUT/PATCH → UPDATE，DELETE → DELETE。模块名取路径里
//! `/api/` 之后的第一段，描述为固定句式。

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::ActivityAction;
use crate::db::repository::activity::ActivityWrite;
use crate::db::repository::parse_record_id;

/// 自动审计中间件，挂在认证中间件之后
pub async fn log_mutations(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let action = match method.as_str() {
        "POST" => Some(ActivityAction::Create),
        "PUT" | "PATCH" => Some(ActivityAction::Update),
        "DELETE" => Some(ActivityAction::Delete),
        _ => None,
    };

    let user = req.extensions().get::<CurrentUser>().cloned();
    let ip_address = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(',').next().unwrap_or(s).trim().to_string());
    let user_agent = req
        .headers()
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let response = next.run(req).await;

    let (Some(action), Some(user)) = (action, user) else {
        return response;
    };
    if !response.status().is_success() || !path.starts_with("/api/") {
        return response;
    }
    let Some(module) = module_from_path(&path) else {
        return response;
    };
    // 登录/登出在 auth handler 内显式记录，避免双写
    if module == "auth" {
        return response;
    }
    let Ok(performed_by) = parse_record_id(&user.id) else {
        return response;
    };

    let action_name = match action {
        ActivityAction::Create => "CREATE",
        ActivityAction::Update => "UPDATE",
        ActivityAction::Delete => "DELETE",
        _ => return response,
    };

    state.activity_service.log(ActivityWrite {
        action,
        module: module.to_string(),
        description: format!("{} action performed on {}", action_name, module),
        performed_by,
        target_id: None,
        target_model: None,
        ip_address,
        user_agent,
    });

    response
}

/// `/api/<module>/...` → `<module>`
fn module_from_path(path: &str) -> Option<&str> {
    let rest = path.strip_prefix("/api/")?;
    let module = rest.split('/').next().unwrap_or(rest);
    if module.is_empty() { None } else { Some(module) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_from_path() {
        assert_eq!(module_from_path("/api/payroll"), Some("payroll"));
        assert_eq!(module_from_path("/api/rooms/room:1/assign"), Some("rooms"));
        assert_eq!(module_from_path("/health"), None);
        assert_eq!(module_from_path("/api/"), None);
    }
}
