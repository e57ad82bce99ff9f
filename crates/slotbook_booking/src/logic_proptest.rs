#[cfg(test)]
mod tests {
    use crate::logic::{compute_occupancy, is_slot_available};
    use proptest::prelude::*;
    use slotbook_common::models::Booking;
    use std::collections::HashSet;

    // Slots drawn from a small pool so duplicates and shared bookings are common
    fn slot_name(index: usize) -> String {
        format!("2024-01-01T{:02}:00:00Z", index % 24)
    }

    fn bookings_for(slot_indices: &[usize]) -> Vec<Booking> {
        slot_indices
            .iter()
            .enumerate()
            .map(|(id, index)| Booking {
                id: id as i64,
                event_id: 1,
                attendee_name: "Attendee".to_string(),
                attendee_email: format!("a{id}@example.com"),
                booked_at: "2024-01-01T00:00:00Z".to_string(),
                slot: slot_name(*index),
            })
            .collect()
    }

    proptest! {
        // One key per distinct slot, no more
        #[test]
        fn test_keys_match_distinct_slots(
            slot_indices in prop::collection::vec(0..12usize, 0..10),
            booking_indices in prop::collection::vec(0..24usize, 0..40),
        ) {
            let slots: Vec<String> = slot_indices.iter().map(|i| slot_name(*i)).collect();
            let occupancy = compute_occupancy(&slots, &bookings_for(&booking_indices));

            let distinct: HashSet<&String> = slots.iter().collect();
            prop_assert_eq!(occupancy.len(), distinct.len());
            for slot in &slots {
                prop_assert!(occupancy.contains(slot));
            }
        }

        // Counted bookings never exceed the bookings given, and match exactly when
        // every booking points at a known slot
        #[test]
        fn test_total_bounded_by_bookings(
            slot_indices in prop::collection::vec(0..24usize, 1..10),
            booking_indices in prop::collection::vec(0..24usize, 0..40),
        ) {
            let slots: Vec<String> = slot_indices.iter().map(|i| slot_name(*i)).collect();
            let bookings = bookings_for(&booking_indices);
            let occupancy = compute_occupancy(&slots, &bookings);
            prop_assert!(occupancy.total() <= bookings.len());

            let known: Vec<usize> = booking_indices
                .iter()
                .copied()
                .filter(|i| slots.contains(&slot_name(*i)))
                .collect();
            let known_occupancy = compute_occupancy(&slots, &bookings_for(&known));
            prop_assert_eq!(known_occupancy.total(), known.len());
        }

        // Same inputs, same map
        #[test]
        fn test_occupancy_is_deterministic(
            slot_indices in prop::collection::vec(0..24usize, 0..10),
            booking_indices in prop::collection::vec(0..24usize, 0..30),
        ) {
            let slots: Vec<String> = slot_indices.iter().map(|i| slot_name(*i)).collect();
            let bookings = bookings_for(&booking_indices);
            prop_assert_eq!(
                compute_occupancy(&slots, &bookings),
                compute_occupancy(&slots, &bookings)
            );
        }

        // A full slot stays full as bookings are added
        #[test]
        fn test_availability_is_monotone(
            max_bookings in 1..6u32,
            booking_count in 0..12usize,
        ) {
            let slots = vec![slot_name(0)];
            let fewer = compute_occupancy(&slots, &bookings_for(&vec![0; booking_count]));
            let more = compute_occupancy(&slots, &bookings_for(&vec![0; booking_count + 1]));

            prop_assert_eq!(
                is_slot_available(&slots[0], &fewer, max_bookings),
                booking_count < max_bookings as usize
            );
            if !is_slot_available(&slots[0], &fewer, max_bookings) {
                prop_assert!(!is_slot_available(&slots[0], &more, max_bookings));
            }
        }
    }
}
