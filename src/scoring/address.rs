use super::similarity::similarity;
use crate::members::{non_empty, AddressRecord};

/// Fields compared by [`address_similarity`], in order
fn compared_fields(address: &AddressRecord) -> [Option<&str>; 5] {
    [
        address.address1.as_deref(),
        address.address2.as_deref(),
        address.city.as_deref(),
        address.district.as_deref(),
        address.pincode.as_deref(),
    ]
}

/// Average similarity over the address fields filled in on both sides.
///
/// Returns 0 when either address is missing or no field is shared.
pub fn address_similarity(a: Option<&AddressRecord>, b: Option<&AddressRecord>) -> u32 {
    let (Some(a), Some(b)) = (a, b) else {
        return 0;
    };

    let mut total = 0u32;
    let mut count = 0u32;
    for (field_a, field_b) in compared_fields(a).into_iter().zip(compared_fields(b)) {
        if let (Some(x), Some(y)) = (non_empty(field_a), non_empty(field_b)) {
            total += similarity(Some(x), Some(y));
            count += 1;
        }
    }

    if count == 0 {
        0
    } else {
        (total as f64 / count as f64).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(city: &str, pincode: &str) -> AddressRecord {
        AddressRecord {
            city: Some(city.to_string()),
            pincode: Some(pincode.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_address_is_zero() {
        let a = address("Ahmedabad", "380001");
        assert_eq!(address_similarity(Some(&a), None), 0);
        assert_eq!(address_similarity(None, Some(&a)), 0);
        assert_eq!(address_similarity(None, None), 0);
    }

    #[test]
    fn test_identical_addresses() {
        let a = address("Ahmedabad", "380001");
        assert_eq!(address_similarity(Some(&a), Some(&a.clone())), 100);
    }

    #[test]
    fn test_only_shared_fields_count() {
        let a = AddressRecord {
            city: Some("Ahmedabad".to_string()),
            address1: Some("12 Ashram Road".to_string()),
            ..Default::default()
        };
        let b = AddressRecord {
            city: Some("Ahmedabad".to_string()),
            district: Some("Ahmedabad".to_string()),
            ..Default::default()
        };
        assert_eq!(address_similarity(Some(&a), Some(&b)), 100);
    }

    #[test]
    fn test_average_of_fields() {
        // city 100, pincode 5/6 digits match -> 83; average 91.5 -> 92
        let a = address("Vadodara", "390001");
        let b = address("vadodara", "390002");
        assert_eq!(address_similarity(Some(&a), Some(&b)), 92);
    }

    #[test]
    fn test_no_shared_fields() {
        let a = AddressRecord {
            city: Some("Surat".to_string()),
            ..Default::default()
        };
        let b = AddressRecord {
            pincode: Some("395003".to_string()),
            city: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(address_similarity(Some(&a), Some(&b)), 0);
    }

    #[test]
    fn test_state_is_ignored() {
        let mut a = address("Surat", "395003");
        let mut b = a.clone();
        a.state = Some("Gujarat".to_string());
        b.state = Some("Maharashtra".to_string());
        assert_eq!(address_similarity(Some(&a), Some(&b)), 100);
    }
}
