mod tests {
    use myrtio_led_driver::{
        ColorOrder, PackedColor, Rgb, Rgb332, Rgb555, Rgbw,
        color::{
            blend_colors, color_wheel, gamma8, gamma32, hsv_to_rgb, hsv1530_to_rgb,
            kelvin_to_rgb, rgb_from_u32, rgb_to_u32, rgbw_from_u32, rgbw_to_u32,
        },
    };

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    #[test]
    fn test_blend_colors() {
        assert_eq!(blend_colors(RED, BLUE, 0), RED);
        assert_eq!(blend_colors(RED, BLUE, 255), BLUE);
        assert_eq!(
            blend_colors(RED, BLUE, 128),
            Rgb {
                r: 127,
                g: 0,
                b: 128
            }
        );
        assert_eq!(
            blend_colors(BLACK, WHITE, 128),
            Rgb {
                r: 128,
                g: 128,
                b: 128
            }
        );
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(hsv1530_to_rgb(0, 255, 255), RED);
        assert_eq!(hsv1530_to_rgb(510, 255, 255), GREEN);
        assert_eq!(hsv1530_to_rgb(1020, 255, 255), BLUE);
        assert_eq!(hsv_to_rgb(0, 255, 255), RED);
    }

    #[test]
    fn test_hsv_wraps_once_per_turn() {
        assert_eq!(color_wheel(1530), color_wheel(0));
        assert_eq!(color_wheel(1529), Rgb { r: 255, g: 0, b: 1 });
        assert_eq!(hsv_to_rgb(65535, 255, 255), hsv_to_rgb(0, 255, 255));
        assert_eq!(
            hsv_to_rgb(65536u32 as u16, 255, 255),
            hsv_to_rgb(0, 255, 255)
        );
    }

    #[test]
    fn test_hsv_segments_share_no_boundary() {
        assert_eq!(color_wheel(254), Rgb { r: 255, g: 254, b: 0 });
        assert_eq!(color_wheel(255), Rgb { r: 255, g: 255, b: 0 });
        assert_eq!(color_wheel(256), Rgb { r: 254, g: 255, b: 0 });
    }

    #[test]
    fn test_hsv_saturation_and_value() {
        assert_eq!(hsv1530_to_rgb(0, 0, 255), WHITE);
        assert_eq!(hsv1530_to_rgb(700, 255, 0), BLACK);
        assert_eq!(hsv1530_to_rgb(0, 0, 0), BLACK);
    }

    #[test]
    fn test_packed_u32() {
        assert_eq!(rgb_from_u32(0x12_34_56), Rgb { r: 0x12, g: 0x34, b: 0x56 });
        assert_eq!(rgb_to_u32(Rgb { r: 0xAB, g: 0xCD, b: 0xEF }), 0xAB_CD_EF);
    }

    #[test]
    fn test_packed_rgbw_u32() {
        assert_eq!(rgbw_from_u32(0x40_12_34_56), Rgbw::new(0x12, 0x34, 0x56, 0x40));
        assert_eq!(rgbw_from_u32(0x12_34_56), Rgbw::new(0x12, 0x34, 0x56, 0));
        assert_eq!(rgbw_to_u32(Rgbw::new(0xAB, 0xCD, 0xEF, 0x01)), 0x01_AB_CD_EF);
        assert_eq!(Rgbw::from(0xFF_00_00_00u32), Rgbw::new(0, 0, 0, 255));
    }

    #[test]
    fn test_gamma() {
        assert_eq!(gamma8(0), 0);
        assert_eq!(gamma8(255), 255);
        assert!(gamma8(128) < 128);
        assert_eq!(gamma32(0xFF_00_FF_00), 0xFF_00_FF_00);
    }

    #[test]
    fn test_kelvin_to_rgb() {
        assert_eq!(kelvin_to_rgb(6600), WHITE);

        let warm = kelvin_to_rgb(2700);
        assert_eq!(warm.r, 255);
        assert!(warm.b < warm.g);

        let cold = kelvin_to_rgb(10_000);
        assert!(cold.r < 255);
        assert_eq!(cold.b, 255);
    }

    #[test]
    fn test_compressed_formats() {
        assert_eq!(Rgb332::pack(Rgbw::new(255, 255, 255, 0)), Rgb332(0xFF));
        assert_eq!(Rgb332(0b111_000_00).to_rgb(), RED);
        assert_eq!(Rgb555::pack(Rgbw::new(255, 0, 0, 0)), Rgb555(0x7C00));
        assert_eq!(Rgb555(0x001F).to_rgb(), BLUE);
        assert_eq!(Rgb555::from_rgb(Rgb { r: 100, g: 0, b: 0 }).to_rgb().r, 99);
    }

    #[test]
    fn test_parse_color_order() {
        assert_eq!(ColorOrder::parse_from_str("GRB"), Some(ColorOrder::GRB));
        assert_eq!(ColorOrder::parse_from_str("grb"), Some(ColorOrder::GRB));
        assert_eq!(ColorOrder::parse_from_str("BGR"), Some(ColorOrder::BGR));
        assert_eq!(ColorOrder::parse_from_str("GRBW"), Some(ColorOrder::GRBW));
        assert_eq!(ColorOrder::parse_from_str("WRGB"), Some(ColorOrder::WRGB));
        assert_eq!(ColorOrder::parse_from_str("RRB"), None);
        assert_eq!(ColorOrder::parse_from_str("RGBX"), None);
        assert_eq!(ColorOrder::parse_from_str("RG"), None);
        assert_eq!(ColorOrder::parse_from_str("RGBWW"), None);
    }

    #[test]
    fn test_arrange() {
        let color = Rgbw::new(1, 2, 3, 4);

        assert_eq!(ColorOrder::GRB.arrange(color, false), ([2, 1, 3, 0], 3));
        assert_eq!(ColorOrder::BRG.arrange(color, false), ([3, 1, 2, 0], 3));
        assert_eq!(ColorOrder::GRBW.arrange(color, true), ([2, 1, 3, 4], 4));
        assert_eq!(ColorOrder::WRGB.arrange(color, true), ([4, 1, 2, 3], 4));
        assert_eq!(ColorOrder::WRGB.arrange(color, false), ([1, 2, 3, 0], 3));
    }
}
