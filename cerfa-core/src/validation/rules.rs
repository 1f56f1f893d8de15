//! Field-level validation rules.
//!
//! Each rule is a pure function returning `Ok(())` or a user-facing message.
//! Optional fields validate vacuously when empty; rules for required fields
//! reject the empty string themselves.

use std::sync::LazyLock;

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use rust_decimal::Decimal;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex")
});

static NATIONAL_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0[1-9][0-9]{8}$").expect("phone regex"));

static INTERNATIONAL_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]{8}$").expect("phone suffix regex"));

static FIVE_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}$").expect("postal regex"));

static FOURTEEN_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{14}$").expect("siret regex"));

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2})/([0-9]{2})/([0-9]{4})$").expect("date regex"));

static CADASTRAL_SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{1,2}$").expect("section regex"));

static PARCEL_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,5}$").expect("parcel regex"));

static PARCEL_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,3}$").expect("prefix regex"));

/// Email address, required.
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("L'adresse email est requise".to_string());
    }
    if !EMAIL_RE.is_match(email) {
        return Err("Format d'email invalide (ex: exemple@email.fr)".to_string());
    }
    Ok(())
}

/// French phone number, optional. Accepts the national `0X XX XX XX XX`
/// form and the international `+33` / `0033` form; separators are ignored.
pub fn validate_phone(phone: &str) -> Result<(), String> {
    if phone.is_empty() {
        return Ok(());
    }
    let clean: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '-'))
        .collect();

    if let Some(suffix) = clean
        .strip_prefix("+33")
        .or_else(|| clean.strip_prefix("0033"))
    {
        if !INTERNATIONAL_SUFFIX_RE.is_match(suffix) {
            return Err("Format international invalide (ex: +33 6 12 34 56 78)".to_string());
        }
        return Ok(());
    }

    if clean.starts_with('0') && clean.len() == 10 {
        if !NATIONAL_PHONE_RE.is_match(&clean) {
            return Err("Numéro de téléphone invalide".to_string());
        }
        return Ok(());
    }

    Err("Format de téléphone invalide (ex: 06 12 34 56 78)".to_string())
}

/// SIRET identifier: exactly 14 digits passing the Luhn checksum.
pub fn validate_siret(siret: &str) -> Result<(), String> {
    if siret.is_empty() {
        return Err("Le numéro SIRET est requis".to_string());
    }
    let clean: String = siret.chars().filter(|c| !c.is_whitespace()).collect();

    if !FOURTEEN_DIGITS_RE.is_match(&clean) {
        return Err("Le SIRET doit contenir exactement 14 chiffres".to_string());
    }

    if !luhn_check(&clean) {
        return Err("Numéro SIRET invalide (vérification Luhn échouée)".to_string());
    }

    Ok(())
}

/// Luhn checksum over a digit string: digits at even positions (0-based) are
/// doubled, 9 is subtracted when the doubling exceeds 9, and the grand total
/// must be a multiple of ten.
fn luhn_check(digits: &str) -> bool {
    let sum: u32 = digits
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let mut digit = u32::from(b - b'0');
            if i % 2 == 0 {
                digit *= 2;
                if digit > 9 {
                    digit -= 9;
                }
            }
            digit
        })
        .sum();
    sum % 10 == 0
}

/// French postal code: five digits whose department part is 01-95,
/// the overseas 97x/98x ranges, or the Corsican 200xx block.
pub fn validate_postal_code(code: &str) -> Result<(), String> {
    if code.is_empty() {
        return Err("Le code postal est requis".to_string());
    }
    let clean = code.trim();

    if !FIVE_DIGITS_RE.is_match(clean) {
        return Err("Le code postal doit contenir 5 chiffres".to_string());
    }

    let dept: u32 = clean[..2].parse().unwrap_or(0);
    let in_mainland = (1..=95).contains(&dept);
    let in_overseas = (97..=98).contains(&dept);
    let in_corsica = clean.starts_with("200");

    if !in_mainland && !in_overseas && !in_corsica {
        return Err("Code postal invalide pour la France".to_string());
    }

    Ok(())
}

/// Date in DD/MM/YYYY with real calendar-day bounds, optional.
/// Years are restricted to 1900 up to the current year.
pub fn validate_date(date: &str) -> Result<(), String> {
    if date.is_empty() {
        return Ok(());
    }

    let Some(captures) = DATE_RE.captures(date) else {
        return Err("Format de date invalide (utilisez JJ/MM/AAAA)".to_string());
    };
    let day: u32 = captures[1].parse().unwrap_or(0);
    let month: u32 = captures[2].parse().unwrap_or(0);
    let year: i32 = captures[3].parse().unwrap_or(0);

    if !(1..=12).contains(&month) {
        return Err("Mois invalide (01-12)".to_string());
    }

    let max_day = days_in_month(year, month);
    if day < 1 || day > max_day {
        return Err(format!("Jour invalide pour ce mois (1-{max_day})"));
    }

    let current_year = Local::now().year();
    if year < 1900 || year > current_year {
        return Err(format!("Année invalide (1900-{current_year})"));
    }

    Ok(())
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

/// Non-empty after trimming.
pub fn validate_required(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field_name} est obligatoire"));
    }
    Ok(())
}

/// Surface in square meters: a non-negative number no larger than 100 000,
/// optional.
pub fn validate_surface(value: &str, field_name: &str) -> Result<(), String> {
    if value.is_empty() {
        return Ok(());
    }
    let Ok(surface) = value.trim().parse::<Decimal>() else {
        return Err(format!("{field_name} doit être un nombre"));
    };
    if surface.is_sign_negative() && !surface.is_zero() {
        return Err(format!("{field_name} ne peut pas être négative"));
    }
    if surface > Decimal::from(100_000) {
        return Err(format!("{field_name} semble trop grande (max 100 000 m²)"));
    }
    Ok(())
}

/// Cadastral reference: section of 1-2 letters, parcel number of 1-5 digits,
/// optional prefix of 1-3 digits.
pub fn validate_cadastral_reference(
    prefix: &str,
    section: &str,
    numero: &str,
) -> Result<(), String> {
    if section.trim().is_empty() || numero.trim().is_empty() {
        return Err("La section et le numéro de parcelle sont requis".to_string());
    }

    if !CADASTRAL_SECTION_RE.is_match(section.trim()) {
        return Err("La section doit contenir 1 ou 2 lettres (ex: A, AB)".to_string());
    }

    if !PARCEL_NUMBER_RE.is_match(numero.trim()) {
        return Err("Le numéro de parcelle doit contenir 1 à 5 chiffres".to_string());
    }

    let prefix = prefix.trim();
    if !prefix.is_empty() && !PARCEL_PREFIX_RE.is_match(prefix) {
        return Err("Le préfixe doit contenir 1 à 3 chiffres (ex: 000, 23)".to_string());
    }

    Ok(())
}

/// Person or company name: 2 to 50 characters once trimmed, no digits.
pub fn validate_name(value: &str, field_name: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field_name} est obligatoire"));
    }
    let trimmed = value.trim();

    if trimmed.chars().count() < 2 {
        return Err(format!("{field_name} est trop court (min. 2 caractères)"));
    }
    if trimmed.chars().count() > 50 {
        return Err(format!("{field_name} est trop long (max. 50 caractères)"));
    }
    if trimmed.chars().any(|c| c.is_ascii_digit()) {
        return Err(format!("{field_name} ne doit pas contenir de chiffres"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // email
    // =========================================================================

    #[test]
    fn email_accepts_plain_address() {
        assert_eq!(validate_email("jean.durand@example.fr"), Ok(()));
    }

    #[test]
    fn email_rejects_empty_and_malformed() {
        assert!(validate_email("").is_err());
        assert!(validate_email("jean.durand").is_err());
        assert!(validate_email("jean@localhost").is_err());
        assert!(validate_email("jean@site.f").is_err());
    }

    // =========================================================================
    // phone
    // =========================================================================

    #[test]
    fn phone_is_optional() {
        assert_eq!(validate_phone(""), Ok(()));
    }

    #[test]
    fn phone_accepts_national_form_with_separators() {
        assert_eq!(validate_phone("06 12 34 56 78"), Ok(()));
        assert_eq!(validate_phone("06.12.34.56.78"), Ok(()));
        assert_eq!(validate_phone("0612345678"), Ok(()));
    }

    #[test]
    fn phone_accepts_international_form() {
        assert_eq!(validate_phone("+33 6 12 34 56 78"), Ok(()));
        assert_eq!(validate_phone("0033612345678"), Ok(()));
    }

    #[test]
    fn phone_rejects_wrong_lengths_and_leading_zero_suffix() {
        assert!(validate_phone("061234567").is_err());
        assert!(validate_phone("+33012345678").is_err());
        assert!(validate_phone("12345").is_err());
    }

    // =========================================================================
    // siret / luhn
    // =========================================================================

    #[test]
    fn siret_accepts_valid_checksum() {
        assert_eq!(validate_siret("73282932000074"), Ok(()));
        // Whitespace is stripped before checking.
        assert_eq!(validate_siret("732 829 320 00074"), Ok(()));
    }

    #[test]
    fn siret_rejects_failing_checksum() {
        assert!(validate_siret("12345678901234").is_err());
    }

    #[test]
    fn siret_rejects_wrong_shape() {
        assert!(validate_siret("").is_err());
        assert!(validate_siret("1234").is_err());
        assert!(validate_siret("7328293200007A").is_err());
    }

    // =========================================================================
    // postal code
    // =========================================================================

    #[test]
    fn postal_code_accepts_mainland_overseas_and_corsica() {
        assert_eq!(validate_postal_code("75001"), Ok(()));
        assert_eq!(validate_postal_code("01000"), Ok(()));
        assert_eq!(validate_postal_code("97400"), Ok(()));
        assert_eq!(validate_postal_code("98800"), Ok(()));
        assert_eq!(validate_postal_code("20000"), Ok(()));
    }

    #[test]
    fn postal_code_rejects_non_digits() {
        assert!(validate_postal_code("2A000").is_err());
    }

    #[test]
    fn postal_code_rejects_impossible_departments() {
        assert!(validate_postal_code("00000").is_err());
        assert!(validate_postal_code("96000").is_err());
        assert!(validate_postal_code("99000").is_err());
    }

    // =========================================================================
    // date
    // =========================================================================

    #[test]
    fn date_is_optional() {
        assert_eq!(validate_date(""), Ok(()));
    }

    #[test]
    fn date_rejects_day_overflow_for_month() {
        // April has 30 days.
        assert!(validate_date("31/04/2020").is_err());
    }

    #[test]
    fn date_handles_leap_years() {
        assert_eq!(validate_date("29/02/2020"), Ok(()));
        assert!(validate_date("29/02/2021").is_err());
    }

    #[test]
    fn date_rejects_bad_format_and_bounds() {
        assert!(validate_date("2020-02-29").is_err());
        assert!(validate_date("01/13/2020").is_err());
        assert!(validate_date("01/01/1899").is_err());
        assert!(validate_date("01/01/9999").is_err());
    }

    // =========================================================================
    // surface
    // =========================================================================

    #[test]
    fn surface_is_optional_and_accepts_decimals() {
        assert_eq!(validate_surface("", "La surface"), Ok(()));
        assert_eq!(validate_surface("120.5", "La surface"), Ok(()));
        assert_eq!(validate_surface("0", "La surface"), Ok(()));
    }

    #[test]
    fn surface_rejects_negative_and_oversized() {
        assert!(validate_surface("-5", "La surface").is_err());
        assert!(validate_surface("100001", "La surface").is_err());
        assert!(validate_surface("abc", "La surface").is_err());
    }

    // =========================================================================
    // cadastral reference
    // =========================================================================

    #[test]
    fn cadastral_reference_accepts_usual_shapes() {
        assert_eq!(validate_cadastral_reference("", "A", "1"), Ok(()));
        assert_eq!(validate_cadastral_reference("000", "AB", "12345"), Ok(()));
        assert_eq!(validate_cadastral_reference("23", "zc", "42"), Ok(()));
    }

    #[test]
    fn cadastral_reference_rejects_bad_parts() {
        assert!(validate_cadastral_reference("", "", "1").is_err());
        assert!(validate_cadastral_reference("", "A", "").is_err());
        assert!(validate_cadastral_reference("", "ABC", "1").is_err());
        assert!(validate_cadastral_reference("", "A", "123456").is_err());
        assert!(validate_cadastral_reference("1234", "A", "1").is_err());
    }

    // =========================================================================
    // name
    // =========================================================================

    #[test]
    fn name_accepts_accents_and_compounds() {
        assert_eq!(validate_name("Durand", "Le nom"), Ok(()));
        assert_eq!(validate_name("Jean-Pierre", "Le prénom"), Ok(()));
        assert_eq!(validate_name("Héloïse", "Le prénom"), Ok(()));
    }

    #[test]
    fn name_rejects_digits_and_bad_lengths() {
        assert!(validate_name("", "Le nom").is_err());
        assert!(validate_name("D", "Le nom").is_err());
        assert!(validate_name("Durand3", "Le nom").is_err());
        assert!(validate_name(&"a".repeat(51), "Le nom").is_err());
    }
}
