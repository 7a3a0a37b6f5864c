// src/services/qr.rs

use std::path::{Path, PathBuf};

use image::Luma;
use qrcode::QrCode;
use uuid::Uuid;

use crate::common::error::AppError;

/// Renderiza `payload` como PNG em `output_dir/filename` e devolve o caminho do arquivo.
pub fn generate(payload: &str, output_dir: &Path, filename: &str) -> Result<PathBuf, AppError> {
    let code = QrCode::new(payload.as_bytes())
        .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

    // Renderiza para imagem
    let image_buffer = code.render::<Luma<u8>>().min_dimensions(256, 256).build();

    std::fs::create_dir_all(output_dir)
        .map_err(|e| anyhow::anyhow!("Falha ao criar {}: {}", output_dir.display(), e))?;

    let path = output_dir.join(filename);
    image_buffer
        .save(&path)
        .map_err(|e| anyhow::anyhow!("Falha ao gravar QR Code em {}: {}", path.display(), e))?;

    Ok(path)
}

// QR Code dos produtos: aponta para a página do produto no frontend
#[derive(Clone)]
pub struct QrGenerator {
    url_frontend: String,
    output_dir: PathBuf,
}

impl QrGenerator {
    pub fn new(url_frontend: String, output_dir: PathBuf) -> Self {
        Self { url_frontend, output_dir }
    }

    pub fn payload_for(&self, product_id: Uuid) -> String {
        format!("{}{}", self.url_frontend, product_id)
    }

    // Escrever o PNG é bloqueante, então vai para o pool de blocking
    pub async fn generate_for_product(&self, product_id: Uuid) -> Result<String, AppError> {
        let payload = self.payload_for(product_id);
        let output_dir = self.output_dir.clone();
        let filename = format!("{product_id}.png");

        let path = tokio::task::spawn_blocking(move || generate(&payload, &output_dir, &filename))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task do QR Code: {}", e))??;

        Ok(path.to_string_lossy().into_owned())
    }
}
