use std::fmt;

use serde::{Deserialize, Serialize};

/// Line rate of a transceiver or cable, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speed {
    #[serde(rename = "1.6T")]
    T1_6,
    #[serde(rename = "800G")]
    G800,
    #[serde(rename = "400G")]
    G400,
    #[serde(rename = "200G")]
    G200,
    #[serde(rename = "100G")]
    G100,
    #[serde(rename = "56G")]
    G56,
    #[serde(rename = "50G")]
    G50,
    #[serde(rename = "40G")]
    G40,
    #[serde(rename = "32G")]
    G32,
    #[serde(rename = "25G")]
    G25,
    #[serde(rename = "16G")]
    G16,
    #[serde(rename = "10G")]
    G10,
    #[serde(rename = "8G")]
    G8,
    #[serde(rename = "2.5G")]
    G2_5,
    #[serde(rename = "1G")]
    G1,
    #[serde(rename = "100M")]
    M100,
}

impl Speed {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Speed::T1_6 => "1.6T",
            Speed::G800 => "800G",
            Speed::G400 => "400G",
            Speed::G200 => "200G",
            Speed::G100 => "100G",
            Speed::G56 => "56G",
            Speed::G50 => "50G",
            Speed::G40 => "40G",
            Speed::G32 => "32G",
            Speed::G25 => "25G",
            Speed::G16 => "16G",
            Speed::G10 => "10G",
            Speed::G8 => "8G",
            Speed::G2_5 => "2.5G",
            Speed::G1 => "1G",
            Speed::M100 => "100M",
        }
    }
}

/// Physical transceiver package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormFactor {
    #[serde(rename = "QSFP-DD")]
    QsfpDd,
    #[serde(rename = "QSFP28")]
    Qsfp28,
    #[serde(rename = "QSFP56")]
    Qsfp56,
    #[serde(rename = "QSFP112")]
    Qsfp112,
    #[serde(rename = "QSFP+")]
    QsfpPlus,
    #[serde(rename = "SFP-DD")]
    SfpDd,
    #[serde(rename = "SFP28")]
    Sfp28,
    #[serde(rename = "SFP56")]
    Sfp56,
    #[serde(rename = "SFP+")]
    SfpPlus,
    #[serde(rename = "XFP")]
    Xfp,
    #[serde(rename = "CFP2")]
    Cfp2,
    #[serde(rename = "CFP4")]
    Cfp4,
    #[serde(rename = "CFP")]
    Cfp,
    #[serde(rename = "OSFP")]
    Osfp,
    #[serde(rename = "DSFP")]
    Dsfp,
    #[serde(rename = "SFP")]
    Sfp,
}

impl FormFactor {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FormFactor::QsfpDd => "QSFP-DD",
            FormFactor::Qsfp28 => "QSFP28",
            FormFactor::Qsfp56 => "QSFP56",
            FormFactor::Qsfp112 => "QSFP112",
            FormFactor::QsfpPlus => "QSFP+",
            FormFactor::SfpDd => "SFP-DD",
            FormFactor::Sfp28 => "SFP28",
            FormFactor::Sfp56 => "SFP56",
            FormFactor::SfpPlus => "SFP+",
            FormFactor::Xfp => "XFP",
            FormFactor::Cfp2 => "CFP2",
            FormFactor::Cfp4 => "CFP4",
            FormFactor::Cfp => "CFP",
            FormFactor::Osfp => "OSFP",
            FormFactor::Dsfp => "DSFP",
            FormFactor::Sfp => "SFP",
        }
    }
}

/// Optical or electrical technology keyword found in a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Technology {
    #[serde(rename = "DWDM")]
    Dwdm,
    #[serde(rename = "CWDM")]
    Cwdm,
    BiDi,
    Tunable,
    #[serde(rename = "DAC")]
    Dac,
    #[serde(rename = "AOC")]
    Aoc,
    #[serde(rename = "PON")]
    Pon,
    #[serde(rename = "SR")]
    Sr,
    #[serde(rename = "LR")]
    Lr,
    #[serde(rename = "ER")]
    Er,
    #[serde(rename = "ZR")]
    Zr,
    #[serde(rename = "DR")]
    Dr,
    #[serde(rename = "FR")]
    Fr,
    #[serde(rename = "LX")]
    Lx,
    #[serde(rename = "SX")]
    Sx,
    #[serde(rename = "EX")]
    Ex,
    #[serde(rename = "ZX")]
    Zx,
}

impl Technology {
    /// Short code used in `Tech_` tags.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Technology::Dwdm => "DWDM",
            Technology::Cwdm => "CWDM",
            Technology::BiDi => "BiDi",
            Technology::Tunable => "Tunable",
            Technology::Dac => "DAC",
            Technology::Aoc => "AOC",
            Technology::Pon => "PON",
            Technology::Sr => "SR",
            Technology::Lr => "LR",
            Technology::Er => "ER",
            Technology::Zr => "ZR",
            Technology::Dr => "DR",
            Technology::Fr => "FR",
            Technology::Lx => "LX",
            Technology::Sx => "SX",
            Technology::Ex => "EX",
            Technology::Zx => "ZX",
        }
    }

    /// Human-readable label for storefront filters, e.g. `"SR (Short Range)"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Technology::Sr => "SR (Short Range)",
            Technology::Lr => "LR (Long Range)",
            Technology::Er => "ER (Extended Range)",
            Technology::Zr => "ZR (Very Long Range)",
            Technology::Dr => "DR (Datacenter Reach)",
            Technology::Fr => "FR (Fiber Reach)",
            other => other.as_str(),
        }
    }

    /// `true` for the IEEE application codes (SR, LR, ..., ZX) as opposed
    /// to transport technologies such as DWDM or DAC.
    #[must_use]
    pub fn is_application_code(self) -> bool {
        matches!(
            self,
            Technology::Sr
                | Technology::Lr
                | Technology::Er
                | Technology::Zr
                | Technology::Dr
                | Technology::Fr
                | Technology::Lx
                | Technology::Sx
                | Technology::Ex
                | Technology::Zx
        )
    }
}

/// Fiber or cable medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Media {
    Singlemode,
    Multimode,
    Copper,
}

impl Media {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Media::Singlemode => "Singlemode",
            Media::Multimode => "Multimode",
            Media::Copper => "Copper",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(Speed, FormFactor, Technology, Media);

/// Structured attributes extracted from a product title.
///
/// Every field is optional: titles are free text and extraction degrades to
/// `None` (or an empty technology list) rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecRecord {
    pub speed: Option<Speed>,
    pub form_factor: Option<FormFactor>,
    /// Reach with whitespace removed, e.g. `"40km"`, `"300m"`.
    pub distance: Option<String>,
    /// Technologies in detection order; duplicates are not suppressed.
    pub technology: Vec<Technology>,
    pub media: Option<Media>,
    /// Upper-cased wavelength token, e.g. `"1550NM"` or `"1270/1330NM"`.
    pub wavelength: Option<String>,
}

impl SpecRecord {
    /// Returns `true` when nothing was recognized in the title.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.speed.is_none()
            && self.form_factor.is_none()
            && self.distance.is_none()
            && self.technology.is_empty()
            && self.media.is_none()
            && self.wavelength.is_none()
    }

    /// The first detected IEEE application code (SR, LR, ...), if any.
    #[must_use]
    pub fn application(&self) -> Option<Technology> {
        self.technology
            .iter()
            .copied()
            .find(|t| t.is_application_code())
    }
}

/// One named axis of variation with this variant's value, e.g.
/// `("Longueur", "5m")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOption {
    pub name: String,
    pub value: String,
    /// `true` for defaults that were not read from the title or the row,
    /// such as a backfilled `Compatibilité = Standard`.
    #[serde(default)]
    pub implicit: bool,
}

impl VariantOption {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            implicit: false,
        }
    }

    #[must_use]
    pub fn implicit(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            implicit: true,
        }
    }
}
