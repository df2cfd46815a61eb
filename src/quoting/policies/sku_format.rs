/// SkuFormat policy for the part-number formats accepted by the catalog
///
/// Hardware parts use `TPNN####`. License SKUs additionally allow the
/// `TPNM####` prefix and the generic `LIC-TPS-<NAME>-<N>Y-<CAP>` form.
pub struct SkuFormat;

impl SkuFormat {
    /// `TPNN` followed by exactly four digits
    pub fn is_hardware_sku(sku: &str) -> bool {
        Self::has_numbered_prefix(sku, "TPNN")
    }

    /// Hardware form, `TPNM####`, or `LIC-TPS-<UPPER>-<digits>Y-<UPPER|DIGIT>`
    pub fn is_license_sku(sku: &str) -> bool {
        Self::has_numbered_prefix(sku, "TPNN")
            || Self::has_numbered_prefix(sku, "TPNM")
            || Self::is_generic_license_sku(sku)
    }

    fn has_numbered_prefix(sku: &str, prefix: &str) -> bool {
        sku.strip_prefix(prefix)
            .is_some_and(|digits| digits.len() == 4 && digits.chars().all(|c| c.is_ascii_digit()))
    }

    fn is_generic_license_sku(sku: &str) -> bool {
        let Some(rest) = sku.strip_prefix("LIC-TPS-") else {
            return false;
        };
        let parts: Vec<&str> = rest.split('-').collect();
        let [name, term, capacity] = parts.as_slice() else {
            return false;
        };

        let name_ok = !name.is_empty() && name.chars().all(|c| c.is_ascii_uppercase());
        let term_ok = term
            .strip_suffix('Y')
            .is_some_and(|years| !years.is_empty() && years.chars().all(|c| c.is_ascii_digit()));
        let capacity_ok = !capacity.is_empty()
            && capacity
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());

        name_ok && term_ok && capacity_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hardware_sku() {
        assert!(SkuFormat::is_hardware_sku("TPNN0424"));
        assert!(!SkuFormat::is_hardware_sku("TPNM0129"));
        assert!(!SkuFormat::is_hardware_sku("TPNN042"));
        assert!(!SkuFormat::is_hardware_sku("TPNN04245"));
        assert!(!SkuFormat::is_hardware_sku("tpnn0424"));
        assert!(!SkuFormat::is_hardware_sku(""));
    }

    #[test]
    fn test_license_sku_numbered() {
        assert!(SkuFormat::is_license_sku("TPNN0276"));
        assert!(SkuFormat::is_license_sku("TPNM0129"));
        assert!(!SkuFormat::is_license_sku("TPNX0129"));
    }

    #[test]
    fn test_license_sku_generic() {
        assert!(SkuFormat::is_license_sku("LIC-TPS-INSPECT-1Y-1G"));
        assert!(SkuFormat::is_license_sku("LIC-TPS-THREATDV-1Y-100G"));
        assert!(SkuFormat::is_license_sku("LIC-TPS-INSPECT-12Y-X"));
        assert!(!SkuFormat::is_license_sku("LIC-TPS-inspect-1Y-1G"));
        assert!(!SkuFormat::is_license_sku("LIC-TPS-INSPECT-Y-1G"));
        assert!(!SkuFormat::is_license_sku("LIC-TPS-INSPECT-1Y-1g"));
        assert!(!SkuFormat::is_license_sku("LIC-TPS-INSPECT-1Y"));
        assert!(!SkuFormat::is_license_sku("LIC-TPS-INSPECT-1Y-1G-X"));
    }
}
