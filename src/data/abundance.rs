//! Natural isotopic abundances as mole fractions, keyed by charge number.
//!
//! Fractions within each element sum to 1. Elements without stable or
//! long-lived natural isotopes are absent.

/// Returns the natural isotope mix of an element as (identifier, mole
/// fraction) pairs, or `None` when the element has no tabulated mix.
pub fn natural(charge: u32) -> Option<&'static [(u32, f64)]> {
    let mix: &'static [(u32, f64)] = match charge {
        1 => &[(1001, 0.999885), (1002, 0.000115)],
        2 => &[(2003, 0.00000134), (2004, 0.99999866)],
        3 => &[(3006, 0.0759), (3007, 0.9241)],
        4 => &[(4009, 1.0)],
        5 => &[(5010, 0.199), (5011, 0.801)],
        6 => &[(6012, 0.9893), (6013, 0.0107)],
        7 => &[(7014, 0.99636), (7015, 0.00364)],
        8 => &[(8016, 0.99757), (8017, 0.00038), (8018, 0.00205)],
        9 => &[(9019, 1.0)],
        11 => &[(11023, 1.0)],
        12 => &[(12024, 0.7899), (12025, 0.1000), (12026, 0.1101)],
        13 => &[(13027, 1.0)],
        14 => &[(14028, 0.92223), (14029, 0.04685), (14030, 0.03092)],
        15 => &[(15031, 1.0)],
        16 => &[
            (16032, 0.9499),
            (16033, 0.0075),
            (16034, 0.0425),
            (16036, 0.0001),
        ],
        17 => &[(17035, 0.7576), (17037, 0.2424)],
        19 => &[(19039, 0.932581), (19040, 0.000117), (19041, 0.067302)],
        20 => &[
            (20040, 0.96941),
            (20042, 0.00647),
            (20043, 0.00135),
            (20044, 0.02086),
            (20046, 0.00004),
            (20048, 0.00187),
        ],
        22 => &[
            (22046, 0.0825),
            (22047, 0.0744),
            (22048, 0.7372),
            (22049, 0.0541),
            (22050, 0.0518),
        ],
        23 => &[(23050, 0.0025), (23051, 0.9975)],
        24 => &[
            (24050, 0.04345),
            (24052, 0.83789),
            (24053, 0.09501),
            (24054, 0.02365),
        ],
        25 => &[(25055, 1.0)],
        26 => &[
            (26054, 0.05845),
            (26056, 0.91754),
            (26057, 0.02119),
            (26058, 0.00282),
        ],
        27 => &[(27059, 1.0)],
        28 => &[
            (28058, 0.68077),
            (28060, 0.26223),
            (28061, 0.011399),
            (28062, 0.036346),
            (28064, 0.009255),
        ],
        29 => &[(29063, 0.6915), (29065, 0.3085)],
        30 => &[
            (30064, 0.4917),
            (30066, 0.2773),
            (30067, 0.0404),
            (30068, 0.1845),
            (30070, 0.0061),
        ],
        40 => &[
            (40090, 0.5145),
            (40091, 0.1122),
            (40092, 0.1715),
            (40094, 0.1738),
            (40096, 0.0280),
        ],
        41 => &[(41093, 1.0)],
        42 => &[
            (42092, 0.1453),
            (42094, 0.0915),
            (42095, 0.1584),
            (42096, 0.1667),
            (42097, 0.0960),
            (42098, 0.2439),
            (42100, 0.0982),
        ],
        47 => &[(47107, 0.51839), (47109, 0.48161)],
        48 => &[
            (48106, 0.0125),
            (48108, 0.0089),
            (48110, 0.1249),
            (48111, 0.1280),
            (48112, 0.2413),
            (48113, 0.1222),
            (48114, 0.2873),
            (48116, 0.0749),
        ],
        49 => &[(49113, 0.0429), (49115, 0.9571)],
        50 => &[
            (50112, 0.0097),
            (50114, 0.0066),
            (50115, 0.0034),
            (50116, 0.1454),
            (50117, 0.0768),
            (50118, 0.2422),
            (50119, 0.0859),
            (50120, 0.3258),
            (50122, 0.0463),
            (50124, 0.0579),
        ],
        64 => &[
            (64152, 0.0020),
            (64154, 0.0218),
            (64155, 0.1480),
            (64156, 0.2047),
            (64157, 0.1565),
            (64158, 0.2484),
            (64160, 0.2186),
        ],
        74 => &[
            (74180, 0.0012),
            (74182, 0.2650),
            (74183, 0.1431),
            (74184, 0.3064),
            (74186, 0.2843),
        ],
        79 => &[(79197, 1.0)],
        82 => &[
            (82204, 0.014),
            (82206, 0.241),
            (82207, 0.221),
            (82208, 0.524),
        ],
        83 => &[(83209, 1.0)],
        90 => &[(90232, 1.0)],
        92 => &[(92234, 0.000054), (92235, 0.007204), (92238, 0.992742)],
        _ => return None,
    };
    Some(mix)
}
