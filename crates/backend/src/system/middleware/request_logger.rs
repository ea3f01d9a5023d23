use axum::body::to_bytes;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::shared::format::group_thousands;

/// Middleware для логирования HTTP запросов
///
/// Пишет в лог:
/// - Метод и путь
/// - Статус код
/// - Длительность (ms)
/// - Размер ответа (разряды через точку)
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Читаем тело ответа, чтобы узнать реальный размер
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(
                "{} {} -> {} in {}ms, body unreadable: {}",
                method,
                uri.path(),
                parts.status.as_u16(),
                start.elapsed().as_millis(),
                e
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let status = parts.status.as_u16();
    let duration_ms = start.elapsed().as_millis();
    let size = group_thousands(bytes.len());

    if parts.status.is_success() {
        tracing::info!(
            "{} {} -> {} in {}ms, {} bytes",
            method,
            uri.path(),
            status,
            duration_ms,
            size
        );
    } else {
        tracing::warn!(
            "{} {} -> {} in {}ms, {} bytes",
            method,
            uri.path(),
            status,
            duration_ms,
            size
        );
    }

    Response::from_parts(parts, Body::from(bytes))
}
