// src/handlers/qr.rs

use axum::{
    extract::{Path, State},
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState};

// Só aceita "<uuid>.png": impede qualquer caminho fora do diretório de QR Codes
fn qr_filename(file: &str) -> Option<String> {
    let stem = file.strip_suffix(".png")?;
    let id = Uuid::parse_str(stem).ok()?;
    Some(format!("{id}.png"))
}

#[utoipa::path(
    get,
    path = "/api/v1/qr_storage/{file}",
    tag = "Products",
    params(("file" = String, Path, description = "<id do produto>.png")),
    responses(
        (status = 200, description = "Imagem PNG do QR Code"),
        (status = 404, description = "Arquivo não encontrado")
    )
)]
pub async fn serve_qr(
    State(app_state): State<AppState>,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let filename = qr_filename(&file).ok_or(AppError::FileNotFound)?;
    let path = app_state.settings.qr_storage_path.join(filename);

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(AppError::FileNotFound),
        Err(e) => return Err(anyhow::anyhow!("Falha ao ler {}: {}", path.display(), e).into()),
    };

    Ok(([(CONTENT_TYPE, "image/png"), (CACHE_CONTROL, "public, max-age=86400")], bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_uuid_png_names_are_served() {
        let id = Uuid::new_v4();
        assert_eq!(qr_filename(&format!("{id}.png")), Some(format!("{id}.png")));

        for bad in ["../secrets.png", "x.png", &format!("{id}.jpg"), &format!("{id}"), "", ".png"] {
            assert_eq!(qr_filename(bad), None, "{bad}");
        }
    }
}
