//! Contact utilities shared by every layer

pub mod email;
pub mod phone;

/// Mask a contact for logs and responses, picking the rule by shape
///
/// Anything containing `@` is treated as an email address, everything else
/// as a phone number.
pub fn mask_contact(contact: &str) -> String {
    if contact.contains('@') {
        email::mask_email(contact)
    } else {
        phone::mask_phone_number(contact)
    }
}
