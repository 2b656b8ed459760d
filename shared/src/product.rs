//! Product shapes as the backend actually sends them, normalized once
//! at the ingestion boundary. The various endpoints disagree about
//! where images live (plain URL lists, url-bearing objects, base64
//! payloads, single-thumbnail fields); `imagen_urls` resolves that in
//! one place so no call site ever probes the raw fields again.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producto {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    pub precio: f64,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub caracteristicas: Vec<Caracteristica>,
    #[serde(rename = "imagenesUrls", default)]
    imagenes_urls: Vec<String>,
    #[serde(default)]
    imagenes: Vec<ImagenRef>,
    #[serde(rename = "imagenUrl", default)]
    imagen_url: Option<String>,
    #[serde(rename = "imagenPrincipal", default)]
    imagen_principal: Option<String>,
    #[serde(rename = "imagenesData", default)]
    imagenes_data: Vec<String>,
    #[serde(rename = "imagenData", default)]
    imagen_data: Option<String>,
}

/// An entry of the `imagenes` list, which mixes bare URL strings with
/// objects that carry the URL under one of two keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImagenRef {
    Url(String),
    Objeto {
        #[serde(default)]
        url: Option<String>,
        #[serde(rename = "imagenUrl", default)]
        imagen_url: Option<String>,
    },
}

impl ImagenRef {
    fn url(&self) -> Option<String> {
        match self {
            ImagenRef::Url(url) => Some(url.clone()),
            ImagenRef::Objeto { url, imagen_url } => url.clone().or_else(|| imagen_url.clone()),
        }
    }
}

impl Producto {
    /// Canonical image list. Fallback order, applied once here:
    /// `imagenesUrls`, the `imagenes` refs, the single `imagenUrl` /
    /// `imagenPrincipal` fields, then the base64 payloads rendered as
    /// data URIs. Empty entries are dropped at every step.
    pub fn imagen_urls(&self) -> Vec<String> {
        let urls: Vec<String> = self
            .imagenes_urls
            .iter()
            .filter(|url| !url.is_empty())
            .cloned()
            .collect();
        if !urls.is_empty() {
            return urls;
        }

        let urls: Vec<String> = self
            .imagenes
            .iter()
            .filter_map(ImagenRef::url)
            .filter(|url| !url.is_empty())
            .collect();
        if !urls.is_empty() {
            return urls;
        }

        if let Some(url) = self
            .imagen_url
            .clone()
            .or_else(|| self.imagen_principal.clone())
            .filter(|url| !url.is_empty())
        {
            return vec![url];
        }

        let datas: Vec<String> = self
            .imagenes_data
            .iter()
            .filter(|data| !data.is_empty())
            .map(|data| format!("data:image/jpeg;base64,{data}"))
            .collect();
        if !datas.is_empty() {
            return datas;
        }

        self.imagen_data
            .iter()
            .filter(|data| !data.is_empty())
            .map(|data| format!("data:image/jpeg;base64,{data}"))
            .collect()
    }

    pub fn imagen_principal(&self) -> Option<String> {
        self.imagen_urls().into_iter().next()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caracteristica {
    pub id: i64,
    pub nombre: String,
    #[serde(rename = "imagenUrl", default)]
    pub imagen_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Producto {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_urls_field_wins_over_everything() {
        let producto = parse(
            r#"{
                "id": 1, "nombre": "Coche", "precio": 50.0,
                "imagenesUrls": ["https://cdn/a.jpg"],
                "imagenes": ["https://cdn/b.jpg"],
                "imagenesData": ["abc"]
            }"#,
        );
        assert_eq!(producto.imagen_urls(), vec!["https://cdn/a.jpg"]);
    }

    #[test]
    fn test_imagenes_accepts_strings_and_objects() {
        let producto = parse(
            r#"{
                "id": 1, "nombre": "Coche", "precio": 50.0,
                "imagenes": [
                    "https://cdn/a.jpg",
                    {"url": "https://cdn/b.jpg"},
                    {"imagenUrl": "https://cdn/c.jpg"},
                    {"url": null, "imagenUrl": null}
                ]
            }"#,
        );
        assert_eq!(
            producto.imagen_urls(),
            vec!["https://cdn/a.jpg", "https://cdn/b.jpg", "https://cdn/c.jpg"]
        );
    }

    #[test]
    fn test_single_fields_before_base64() {
        let producto = parse(
            r#"{
                "id": 1, "nombre": "Coche", "precio": 50.0,
                "imagenPrincipal": "https://cdn/main.jpg",
                "imagenesData": ["abc"]
            }"#,
        );
        assert_eq!(producto.imagen_urls(), vec!["https://cdn/main.jpg"]);
    }

    #[test]
    fn test_base64_payloads_become_data_uris() {
        let producto = parse(
            r#"{"id": 1, "nombre": "Coche", "precio": 50.0, "imagenesData": ["abc", "def"]}"#,
        );
        assert_eq!(
            producto.imagen_urls(),
            vec!["data:image/jpeg;base64,abc", "data:image/jpeg;base64,def"]
        );

        let producto =
            parse(r#"{"id": 1, "nombre": "Coche", "precio": 50.0, "imagenData": "xyz"}"#);
        assert_eq!(producto.imagen_principal().unwrap(), "data:image/jpeg;base64,xyz");
    }

    #[test]
    fn test_no_images_at_all() {
        let producto = parse(r#"{"id": 1, "nombre": "Coche", "precio": 50.0}"#);
        assert!(producto.imagen_urls().is_empty());
        assert!(producto.imagen_principal().is_none());
    }

    #[test]
    fn test_empty_strings_are_dropped() {
        let producto = parse(
            r#"{"id": 1, "nombre": "Coche", "precio": 50.0, "imagenesUrls": ["", "https://cdn/a.jpg"]}"#,
        );
        assert_eq!(producto.imagen_urls(), vec!["https://cdn/a.jpg"]);
    }
}
