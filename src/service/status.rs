use crate::db::PackageStatus;

/// Map a carrier milestone onto the internal status taxonomy.
///
/// Matching is case-insensitive and by substring, checked in order:
/// delivered, out for delivery, in transit, exception. Unknown text is
/// treated as in transit; a missing or blank milestone is pending.
pub fn normalize_milestone(milestone: Option<&str>) -> PackageStatus {
    let Some(raw) = milestone.map(str::trim).filter(|s| !s.is_empty()) else {
        return PackageStatus::Pending;
    };
    let status = raw.to_lowercase();

    if status.contains("delivered") {
        PackageStatus::Delivered
    } else if status.contains("out_for_delivery") || status.contains("out for delivery") {
        PackageStatus::OutForDelivery
    } else if status.contains("in_transit") || status.contains("transit") {
        PackageStatus::InTransit
    } else if status.contains("exception") || status.contains("failed") {
        PackageStatus::Exception
    } else {
        PackageStatus::InTransit
    }
}
