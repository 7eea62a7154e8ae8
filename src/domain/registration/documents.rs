//! Files attached to a registration

use crate::domain::upload::{DocumentKind, UploadFile};

/// Attachments of one registration; the membership document is optional
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDocuments {
    pub payment_receipt: UploadFile,
    pub identity_document: UploadFile,
    pub membership_document: Option<UploadFile>,
}

impl RegistrationDocuments {
    pub fn new(payment_receipt: UploadFile, identity_document: UploadFile) -> Self {
        Self {
            payment_receipt,
            identity_document,
            membership_document: None,
        }
    }

    pub fn with_membership_document(mut self, document: UploadFile) -> Self {
        self.membership_document = Some(document);
        self
    }

    /// Attached documents in submission order
    pub fn entries(&self) -> Vec<(DocumentKind, &UploadFile)> {
        let mut entries = vec![
            (DocumentKind::PaymentReceipt, &self.payment_receipt),
            (DocumentKind::IdentityDocument, &self.identity_document),
        ];

        if let Some(membership) = &self.membership_document {
            entries.push((DocumentKind::MembershipDocument, membership));
        }

        entries
    }
}
