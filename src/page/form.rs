use axum::{
    body::to_bytes,
    extract::{FromRequest, Multipart, Request},
};
use bytes::Bytes;
use hyper::{header, HeaderMap};
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::{errors::Error, Result};

/// A single submitted value: either a plain string or an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(FormFile),
}

impl FormValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(text) => Some(text),
            FormValue::File(_) => None,
        }
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Text(value)
    }
}

impl Serialize for FormValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FormValue::Text(text) => serializer.serialize_str(text),
            FormValue::File(file) => file.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

// Files are echoed by their metadata, never by their content.
impl Serialize for FormFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FormFile", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("type", &self.content_type)?;
        state.serialize_field("size", &self.bytes.len())?;
        state.end()
    }
}

/// The parsed body of a form submission.
///
/// Every `(name, value)` pair is kept in submission order, so repeated
/// field names are preserved. Lookups never fail: a missing name is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, FormValue)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<FormValue>) {
        self.entries.push((name.into(), value.into()));
    }

    /// The first value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FormValue> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Buffer and decode the body of `request`.
    ///
    /// `limit` bounds url-encoded bodies; multipart bodies are bounded by the
    /// router's `DefaultBodyLimit`.
    pub async fn from_request(request: Request, limit: usize) -> Result<Self> {
        match form_kind(request.headers())? {
            FormKind::UrlEncoded => {
                let bytes = to_bytes(request.into_body(), limit)
                    .await
                    .map_err(|e| Error::MalformedForm(e.to_string()))?;
                Self::from_urlencoded(&bytes)
            }
            FormKind::Multipart => {
                let multipart = Multipart::from_request(request, &())
                    .await
                    .map_err(|e| Error::MalformedForm(e.to_string()))?;
                Self::from_multipart(multipart).await
            }
        }
    }

    pub fn from_urlencoded(bytes: &[u8]) -> Result<Self> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(bytes)
            .map_err(|e| Error::MalformedForm(e.to_string()))?;
        Ok(pairs
            .into_iter()
            .map(|(name, value)| (name, FormValue::Text(value)))
            .collect())
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut form = FormData::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| Error::MalformedForm(e.to_string()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let value = match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| Error::MalformedForm(e.to_string()))?;
                    FormValue::File(FormFile {
                        name: file_name,
                        content_type,
                        bytes,
                    })
                }
                None => FormValue::Text(
                    field
                        .text()
                        .await
                        .map_err(|e| Error::MalformedForm(e.to_string()))?,
                ),
            };
            form.append(name, value);
        }
        Ok(form)
    }
}

impl FromIterator<(String, FormValue)> for FormData {
    fn from_iter<I: IntoIterator<Item = (String, FormValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum FormKind {
    UrlEncoded,
    Multipart,
}

fn form_kind(headers: &HeaderMap) -> Result<FormKind> {
    let Some(content_type) = headers.get(header::CONTENT_TYPE) else {
        return Err(Error::MissingContentType);
    };
    let Ok(content_type) = content_type.to_str() else {
        return Err(Error::MissingContentType);
    };
    let Ok(mime) = content_type.parse::<mime::Mime>() else {
        return Err(Error::UnsupportedContentType(content_type.to_string()));
    };

    if mime.type_() == mime::APPLICATION && mime.subtype() == mime::WWW_FORM_URLENCODED {
        Ok(FormKind::UrlEncoded)
    } else if mime.type_() == mime::MULTIPART && mime.subtype() == mime::FORM_DATA {
        Ok(FormKind::Multipart)
    } else {
        Err(Error::UnsupportedContentType(content_type.to_string()))
    }
}
