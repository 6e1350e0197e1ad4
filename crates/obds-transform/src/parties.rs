//! `Absender` and `Melder`

use obds_model::{IdentNumbers, Reporter, Sender, SourceReporter, SourceSender};

/// Software ID stamped into every converted document.
pub const SOFTWARE_ID: &str = "obds2to3";

/// Version stamped next to [`SOFTWARE_ID`].
pub const SOFTWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The converter becomes the sending software; the sending institution is
/// kept.
pub fn map_sender(source: &SourceSender) -> Sender {
    Sender {
        id: source.id.clone(),
        software_id: SOFTWARE_ID.to_string(),
        software_version: SOFTWARE_VERSION.to_string(),
        name: source.name.clone(),
        contact_person: source.contact_person.clone(),
        address: source.address.clone(),
        phone: source.phone.clone(),
        email: source.email.clone(),
    }
}

pub fn map_reporter(source: &SourceReporter) -> Reporter {
    Reporter {
        id: source.id.clone(),
        department: source.department.clone(),
        physician_name: source.physician_name.clone(),
        address: source.address.clone(),
        postal_code: source.postal_code.clone(),
        city: source.city.clone(),
        bank_name: source.bank_name.clone(),
        account_holder: source.account_holder.clone(),
        bic: source.bic.clone(),
        iban: source.iban.clone(),
        ident_numbers: IdentNumbers {
            iknr: source.iknr.clone(),
            lanr: source.lanr.clone(),
            bsnr: source.bsnr.clone(),
        },
    }
}
