//! Built-in sample data.

use crate::dataset::{RatingDataset, RatingVector};

/// Eight listeners rating eight bands on a 1 to 5 scale.
///
/// Small enough to reason about by hand and sparse enough to exercise every
/// pipeline edge: some pairs share no variance, some listeners rated nearly
/// everything, and one band (Deadmau5) is missing from several profiles.
pub fn music_ratings() -> RatingDataset {
    let users: [(&str, &[(&str, f64)]); 8] = [
        (
            "Angelica",
            &[
                ("Blues Traveler", 3.5),
                ("Broken Bells", 2.0),
                ("Norah Jones", 4.5),
                ("Phoenix", 5.0),
                ("Slightly Stoopid", 1.5),
                ("The Strokes", 2.5),
                ("Vampire Weekend", 2.0),
            ],
        ),
        (
            "Bill",
            &[
                ("Blues Traveler", 2.0),
                ("Broken Bells", 3.5),
                ("Deadmau5", 4.0),
                ("Phoenix", 2.0),
                ("Slightly Stoopid", 3.5),
                ("Vampire Weekend", 3.0),
            ],
        ),
        (
            "Chan",
            &[
                ("Blues Traveler", 5.0),
                ("Broken Bells", 1.0),
                ("Deadmau5", 1.0),
                ("Norah Jones", 3.0),
                ("Phoenix", 5.0),
                ("Slightly Stoopid", 1.0),
            ],
        ),
        (
            "Dan",
            &[
                ("Blues Traveler", 3.0),
                ("Broken Bells", 4.0),
                ("Deadmau5", 4.5),
                ("Phoenix", 3.0),
                ("Slightly Stoopid", 4.5),
                ("The Strokes", 4.0),
                ("Vampire Weekend", 2.0),
            ],
        ),
        (
            "Hailey",
            &[
                ("Broken Bells", 4.0),
                ("Deadmau5", 1.0),
                ("Norah Jones", 4.0),
                ("The Strokes", 4.0),
                ("Vampire Weekend", 1.0),
            ],
        ),
        (
            "Jordyn",
            &[
                ("Broken Bells", 4.5),
                ("Deadmau5", 4.0),
                ("Norah Jones", 5.0),
                ("Phoenix", 5.0),
                ("Slightly Stoopid", 4.5),
                ("The Strokes", 4.0),
                ("Vampire Weekend", 4.0),
            ],
        ),
        (
            "Sam",
            &[
                ("Blues Traveler", 5.0),
                ("Broken Bells", 2.0),
                ("Norah Jones", 3.0),
                ("Phoenix", 5.0),
                ("Slightly Stoopid", 4.0),
                ("The Strokes", 5.0),
            ],
        ),
        (
            "Veronica",
            &[
                ("Blues Traveler", 3.0),
                ("Norah Jones", 5.0),
                ("Phoenix", 4.0),
                ("Slightly Stoopid", 2.5),
                ("The Strokes", 3.0),
            ],
        ),
    ];

    users
        .into_iter()
        .map(|(user, ratings)| (user, ratings.iter().copied().collect::<RatingVector>()))
        .collect()
}
