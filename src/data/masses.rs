//! Nuclide molar masses in atomic mass units, keyed by packed identifier.
//!
//! Covers every isotope carried by the natural abundance table plus the
//! actinides and isomers that appear in reactor material definitions.

/// Returns the molar mass in amu for a packed nuclide identifier.
pub fn molar_mass(zaid: u32) -> Option<f64> {
    let mass = match zaid {
        1001 => 1.007825,
        1002 => 2.014102,
        1003 => 3.016049,
        2003 => 3.016029,
        2004 => 4.002602,
        3006 => 6.015123,
        3007 => 7.016003,
        4009 => 9.012183,
        5010 => 10.012937,
        5011 => 11.009305,
        6012 => 12.0,
        6013 => 13.003355,
        6014 => 14.003242,
        7014 => 14.003074,
        7015 => 15.000109,
        8016 => 15.994915,
        8017 => 16.999132,
        8018 => 17.999160,
        9019 => 18.998403,
        11023 => 22.989769,
        12024 => 23.985042,
        12025 => 24.985837,
        12026 => 25.982593,
        13027 => 26.981538,
        14028 => 27.976927,
        14029 => 28.976495,
        14030 => 29.973770,
        15031 => 30.973762,
        16032 => 31.972071,
        16033 => 32.971459,
        16034 => 33.967867,
        16036 => 35.967081,
        17035 => 34.968853,
        17037 => 36.965903,
        19039 => 38.963706,
        19040 => 39.963998,
        19041 => 40.961825,
        20040 => 39.962591,
        20042 => 41.958618,
        20043 => 42.958766,
        20044 => 43.955482,
        20046 => 45.953690,
        20048 => 47.952523,
        22046 => 45.952628,
        22047 => 46.951759,
        22048 => 47.947942,
        22049 => 48.947866,
        22050 => 49.944787,
        23050 => 49.947156,
        23051 => 50.943957,
        24050 => 49.946042,
        24052 => 51.940506,
        24053 => 52.940648,
        24054 => 53.938879,
        25055 => 54.938044,
        26054 => 53.939609,
        26056 => 55.934936,
        26057 => 56.935393,
        26058 => 57.933274,
        27059 => 58.933194,
        28058 => 57.935342,
        28060 => 59.930786,
        28061 => 60.931056,
        28062 => 61.928345,
        28064 => 63.927967,
        29063 => 62.929597,
        29065 => 64.927790,
        30064 => 63.929142,
        30066 => 65.926034,
        30067 => 66.927128,
        30068 => 67.924844,
        30070 => 69.925319,
        40090 => 89.904697,
        40091 => 90.905640,
        40092 => 91.905035,
        40094 => 93.906311,
        40096 => 95.908271,
        41093 => 92.906373,
        42092 => 91.906808,
        42094 => 93.905085,
        42095 => 94.905839,
        42096 => 95.904676,
        42097 => 96.906018,
        42098 => 97.905405,
        42100 => 99.907472,
        47107 => 106.905092,
        47109 => 108.904756,
        48106 => 105.906460,
        48108 => 107.904184,
        48110 => 109.903007,
        48111 => 110.904183,
        48112 => 111.902763,
        48113 => 112.904408,
        48114 => 113.903365,
        48116 => 115.904763,
        49113 => 112.904060,
        49115 => 114.903879,
        50112 => 111.904824,
        50114 => 113.902783,
        50115 => 114.903345,
        50116 => 115.901743,
        50117 => 116.902954,
        50118 => 117.901607,
        50119 => 118.903311,
        50120 => 119.902202,
        50122 => 121.903444,
        50124 => 123.905277,
        64152 => 151.919799,
        64154 => 153.920873,
        64155 => 154.922630,
        64156 => 155.922131,
        64157 => 156.923968,
        64158 => 157.924112,
        64160 => 159.927062,
        74180 => 179.946713,
        74182 => 181.948206,
        74183 => 182.950224,
        74184 => 183.950933,
        74186 => 185.954365,
        79197 => 196.966570,
        82204 => 203.973044,
        82206 => 205.974466,
        82207 => 206.975897,
        82208 => 207.976653,
        83209 => 208.980399,
        90232 => 232.038056,
        91231 => 231.035884,
        92233 => 233.039635,
        92234 => 234.040952,
        92235 => 235.043930,
        92236 => 236.045568,
        92238 => 238.050788,
        93237 => 237.048174,
        94238 => 238.049560,
        94239 => 239.052164,
        94240 => 240.053814,
        94241 => 241.056852,
        94242 => 242.058743,
        // Am-242 ground state and first isomer carry the swapped historical
        // identifiers; the isomer sits 48.6 keV above the ground state.
        95241 => 241.056829,
        95642 => 242.059549,
        95242 => 242.059601,
        95243 => 243.061381,
        96244 => 244.062753,
        _ => return None,
    };
    Some(mass)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn common_nuclides_present() {
        assert!(approx_eq(molar_mass(1001).unwrap(), 1.007825, 1e-6));
        assert!(approx_eq(molar_mass(8016).unwrap(), 15.994915, 1e-6));
        assert!(approx_eq(molar_mass(92235).unwrap(), 235.04393, 1e-5));
        assert!(approx_eq(molar_mass(94239).unwrap(), 239.052164, 1e-6));
    }

    #[test]
    fn am242_pair_uses_swapped_identifiers() {
        let ground = molar_mass(95642).unwrap();
        let isomer = molar_mass(95242).unwrap();
        assert!(isomer > ground);
    }

    #[test]
    fn absent_nuclide_is_none() {
        assert_eq!(molar_mass(118294), None);
        assert_eq!(molar_mass(0), None);
    }
}
