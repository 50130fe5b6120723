//! Package options

/// Options for [`XlsxSink`](crate::XlsxSink)
#[derive(Debug, Clone, PartialEq)]
pub struct XlsxOptions {
    /// Width of columns that never received an explicit width
    /// (None = the application default)
    pub default_column_width: Option<f64>,
    /// Deflate the package parts; when false they are stored uncompressed
    pub compress: bool,
}

impl Default for XlsxOptions {
    fn default() -> Self {
        Self {
            default_column_width: None,
            compress: true,
        }
    }
}

impl XlsxOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default column width
    pub fn default_column_width(mut self, width: f64) -> Self {
        self.default_column_width = Some(width);
        self
    }

    /// Enable or disable compression
    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub(crate) fn compression_method(&self) -> zip::CompressionMethod {
        if self.compress {
            zip::CompressionMethod::Deflated
        } else {
            zip::CompressionMethod::Stored
        }
    }
}
