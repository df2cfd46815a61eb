use crate::quoting::domain::model::{MODEL_SLOT_COUNT, TXE_FAMILY};
use crate::quoting::domain::{
    io_module::IO_MODULE_CATEGORY, license::LICENSE_CATEGORY, IoModule, License, LicenseKey,
    Model, ProductCatalog, SmsModel,
};
use crate::quoting::policies::{CompatibilityTable, SkuFormat};
use crate::shared::error::CatalogError;

/// Identity of any record that owns a SKU in the shared namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRef<'a> {
    /// Keyed by model id
    Model(&'a str),
    IoModule(&'a str),
    License(LicenseKey<'a>),
    Sms(&'a str),
}

impl RecordRef<'_> {
    /// Two records may carry the same SKU only when both are licenses
    /// bound to different models.
    fn may_share_sku_with(&self, other: &RecordRef<'_>) -> bool {
        match (self, other) {
            (RecordRef::License(a), RecordRef::License(b)) => a.model_id != b.model_id,
            _ => false,
        }
    }
}

fn invalid(kind: &'static str, field: &'static str, reason: impl Into<String>) -> CatalogError {
    CatalogError::InvalidRecord {
        kind,
        field,
        reason: reason.into(),
    }
}

fn require_non_empty(kind: &'static str, field: &'static str, value: &str) -> Result<(), CatalogError> {
    if value.trim().is_empty() {
        return Err(invalid(kind, field, "must not be empty"));
    }
    Ok(())
}

/// False for zero, negatives and NaN
fn is_positive(value: f64) -> bool {
    value > 0.0
}

fn require_price(kind: &'static str, price: Option<f64>) -> Result<(), CatalogError> {
    match price {
        Some(p) if p < 0.0 || p.is_nan() => {
            Err(invalid(kind, "price", "must be zero or greater"))
        }
        _ => Ok(()),
    }
}

/// CatalogValidator service guarding catalog mutations
///
/// Record checks mirror the admin form schemas. Document checks add SKU
/// uniqueness, where license records are identified by (sku, modelId) so
/// a SKU may repeat across licenses bound to different models.
pub struct CatalogValidator;

impl CatalogValidator {
    pub fn validate_model(model: &Model) -> Result<(), CatalogError> {
        const KIND: &str = "model";
        require_non_empty(KIND, "id", &model.id)?;
        require_non_empty(KIND, "name", &model.name)?;
        if model.family != TXE_FAMILY {
            return Err(invalid(KIND, "family", format!("must be {}", TXE_FAMILY)));
        }
        if !is_positive(model.base_gbps) {
            return Err(invalid(KIND, "baseGbps", "must be positive"));
        }
        if let Some(sku) = &model.sku {
            if !SkuFormat::is_hardware_sku(sku) {
                return Err(invalid(KIND, "sku", "must follow TPNN#### format"));
            }
        }
        if model.tiers.is_empty() {
            return Err(invalid(KIND, "tiers", "must contain at least one tier"));
        }
        for tier in &model.tiers {
            require_non_empty(KIND, "tiers.label", &tier.label)?;
            if !is_positive(tier.gbps) {
                return Err(invalid(KIND, "tiers.gbps", "must be positive"));
            }
        }
        if model.slots != MODEL_SLOT_COUNT {
            return Err(invalid(
                KIND,
                "slots",
                format!("must be {}", MODEL_SLOT_COUNT),
            ));
        }
        require_price(KIND, model.price)
    }

    pub fn validate_module(module: &IoModule) -> Result<(), CatalogError> {
        const KIND: &str = "module";
        if !SkuFormat::is_hardware_sku(&module.sku) {
            return Err(invalid(KIND, "sku", "must follow TPNN#### format"));
        }
        require_non_empty(KIND, "name", &module.name)?;
        require_non_empty(KIND, "ports", &module.ports)?;
        require_non_empty(KIND, "portSpeed", &module.port_speed)?;
        if module.category != IO_MODULE_CATEGORY {
            return Err(invalid(
                KIND,
                "category",
                format!("must be {}", IO_MODULE_CATEGORY),
            ));
        }
        require_price(KIND, module.price)
    }

    pub fn validate_license(license: &License) -> Result<(), CatalogError> {
        const KIND: &str = "license";
        if !SkuFormat::is_license_sku(&license.sku) {
            return Err(invalid(
                KIND,
                "sku",
                "must follow TPNN#### or LIC-TPS-#### format",
            ));
        }
        require_non_empty(KIND, "name", &license.name)?;
        if license.category != LICENSE_CATEGORY {
            return Err(invalid(
                KIND,
                "category",
                format!("must be {}", LICENSE_CATEGORY),
            ));
        }
        if !is_positive(license.applies_to_gbps_max) {
            return Err(invalid(KIND, "appliesToGbpsMax", "must be positive"));
        }
        if license.group.is_none() {
            return Err(invalid(KIND, "group", "must be INSPECT or THREATDV"));
        }
        if let Some(model_id) = &license.model_id {
            require_non_empty(KIND, "modelId", model_id)?;
        }
        require_price(KIND, license.price)
    }

    pub fn validate_sms(sms: &SmsModel) -> Result<(), CatalogError> {
        const KIND: &str = "SMS";
        if !SkuFormat::is_hardware_sku(&sms.sku) {
            return Err(invalid(KIND, "sku", "must follow TPNN#### format"));
        }
        require_non_empty(KIND, "name", &sms.name)
    }

    /// Every SKU-carrying record with the SKU it carries
    fn sku_owners(catalog: &ProductCatalog) -> Vec<(RecordRef<'_>, &str)> {
        let models = catalog
            .models
            .iter()
            .filter_map(|m| m.sku.as_deref().map(|sku| (RecordRef::Model(&m.id), sku)));
        let modules = catalog
            .io_modules
            .iter()
            .map(|m| (RecordRef::IoModule(&m.sku), m.sku.as_str()));
        let licenses = catalog
            .licenses
            .iter()
            .map(|l| (RecordRef::License(l.key()), l.sku.as_str()));
        let sms = catalog
            .sms_models
            .iter()
            .map(|s| (RecordRef::Sms(&s.sku), s.sku.as_str()));

        models.chain(modules).chain(licenses).chain(sms).collect()
    }

    /// Checks that `candidate` may carry `sku` in the catalog
    ///
    /// # Arguments
    /// * `catalog` - Catalog the record is added to or updated in
    /// * `candidate` - Identity of the record being written
    /// * `sku` - SKU the record will carry
    /// * `replacing` - Record being updated, excluded from the comparison
    ///
    /// # Errors
    /// Returns `DuplicateSku` when another record already owns the SKU
    pub fn ensure_sku_available(
        catalog: &ProductCatalog,
        candidate: RecordRef<'_>,
        sku: &str,
        replacing: Option<RecordRef<'_>>,
    ) -> Result<(), CatalogError> {
        let taken = Self::sku_owners(catalog).into_iter().any(|(owner, owner_sku)| {
            owner_sku == sku && Some(owner) != replacing && !candidate.may_share_sku_with(&owner)
        });
        if taken {
            return Err(CatalogError::DuplicateSku {
                sku: sku.to_string(),
            });
        }
        Ok(())
    }

    /// Checks a license's model binding against the catalog and override table
    ///
    /// # Errors
    /// * `UnknownModel` - the bound model is not in the catalog
    /// * `IncompatibleLicense` - the SKU is shared only between other models;
    ///   the message lists their display names
    pub fn ensure_license_binding(
        catalog: &ProductCatalog,
        table: &CompatibilityTable,
        license: &License,
    ) -> Result<(), CatalogError> {
        let Some(model_id) = license.model_id.as_deref() else {
            return Ok(());
        };
        if catalog.find_model(model_id).is_none() {
            return Err(CatalogError::UnknownModel {
                model_id: model_id.to_string(),
            });
        }
        if let Some(allowed) = table.license_override(&license.sku) {
            if !allowed.iter().any(|m| m == model_id) {
                let compatible = allowed
                    .iter()
                    .map(|id| {
                        catalog
                            .find_model(id)
                            .map(|m| m.name.clone())
                            .unwrap_or_else(|| id.clone())
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(CatalogError::IncompatibleLicense {
                    sku: license.sku.clone(),
                    compatible,
                });
            }
        }
        Ok(())
    }

    /// Rejects removing a model while licenses are bound to it
    pub fn ensure_model_removable(
        catalog: &ProductCatalog,
        model_id: &str,
    ) -> Result<(), CatalogError> {
        let licenses: Vec<String> = catalog
            .licenses
            .iter()
            .filter(|l| l.is_bound_to(model_id))
            .map(|l| l.sku.clone())
            .collect();
        if licenses.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::ModelInUse {
                model_id: model_id.to_string(),
                licenses,
            })
        }
    }

    /// Validates a whole catalog document before it is stored
    ///
    /// Checks every record, model id uniqueness, SKU uniqueness across the
    /// shared namespace and that bound licenses name an existing model.
    pub fn validate_document(catalog: &ProductCatalog) -> Result<(), CatalogError> {
        catalog.models.iter().try_for_each(Self::validate_model)?;
        catalog.io_modules.iter().try_for_each(Self::validate_module)?;
        catalog.licenses.iter().try_for_each(Self::validate_license)?;
        catalog.sms_models.iter().try_for_each(Self::validate_sms)?;

        for (i, model) in catalog.models.iter().enumerate() {
            if catalog.models[..i].iter().any(|m| m.id == model.id) {
                return Err(CatalogError::DuplicateModelId {
                    id: model.id.clone(),
                });
            }
        }

        let owners = Self::sku_owners(catalog);
        for (i, (owner, sku)) in owners.iter().enumerate() {
            let clash = owners[..i]
                .iter()
                .any(|(other, other_sku)| other_sku == sku && !owner.may_share_sku_with(other));
            if clash {
                return Err(CatalogError::DuplicateSku {
                    sku: sku.to_string(),
                });
            }
        }

        for license in &catalog.licenses {
            if let Some(model_id) = license.model_id.as_deref() {
                if catalog.find_model(model_id).is_none() {
                    return Err(CatalogError::UnknownModel {
                        model_id: model_id.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}
