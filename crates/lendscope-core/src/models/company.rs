//! Static company profiles.

use serde::{Deserialize, Serialize};

/// A lending company tracked by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Short roster key, also used for cache and output file names.
    pub key: String,

    /// Display name.
    pub name: String,

    /// BSE scrip code used for filing discovery.
    pub bse_code: String,

    /// NSE trading symbol.
    pub nse_symbol: String,

    /// Nominal value of one share in rupees.
    #[serde(default = "default_face_value")]
    pub face_value: f64,

    /// Parent has non-lending segments whose rows must be ignored.
    #[serde(default)]
    pub lending_only: bool,
}

fn default_face_value() -> f64 {
    2.0
}

impl CompanyProfile {
    /// Create a profile with the default face value and no segment filter.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        bse_code: impl Into<String>,
        nse_symbol: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            bse_code: bse_code.into(),
            nse_symbol: nse_symbol.into(),
            face_value: default_face_value(),
            lending_only: false,
        }
    }

    /// Set the face value.
    pub fn with_face_value(mut self, face_value: f64) -> Self {
        self.face_value = face_value;
        self
    }

    /// Mark the company as lending-only.
    pub fn lending_only(mut self) -> Self {
        self.lending_only = true;
        self
    }
}

/// The roster tracked out of the box.
pub fn default_roster() -> Vec<CompanyProfile> {
    vec![
        CompanyProfile::new("poonawalla", "Poonawalla Fincorp", "524000", "POONAWALLA"),
        CompanyProfile::new("bajaj", "Bajaj Finance", "500034", "BAJFINANCE"),
        CompanyProfile::new("shriram", "Shriram Finance", "511218", "SHRIRAMFIN")
            .with_face_value(10.0),
        CompanyProfile::new("ltf", "L&T Finance", "533519", "LTF").with_face_value(10.0),
        CompanyProfile::new("chola", "Cholamandalam Finance", "511243", "CHOLAFIN"),
        CompanyProfile::new("abcapital", "Aditya Birla Capital", "540691", "ABCAPITAL")
            .lending_only(),
        // Listed through the parent, which also carries a pharma business.
        CompanyProfile::new("piramal", "Piramal Finance", "500302", "PEL").lending_only(),
        CompanyProfile::new("muthoot", "Muthoot Finance", "533398", "MUTHOOTFIN")
            .with_face_value(10.0),
        CompanyProfile::new("mahindra", "Mahindra Finance", "532720", "M&MFIN"),
    ]
}
