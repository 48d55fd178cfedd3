use super::*;

#[test]
fn known_gems_have_fixed_colors() {
    let ruby = gem_color_info("Ruby");
    assert_eq!(ruby.hex_color, "#DC143C");
    assert_eq!(ruby.icon, '◆');
    assert_eq!(ruby.description, "Ruby gem - Red mana");
    assert_eq!(gem_color_info("Sapphire").hex_color, "#0047AB");
    assert_eq!(gem_color_info("Obsidian").hex_color, "#1A1A1A");
}

#[test]
fn diamond_uses_hollow_icon() {
    assert_eq!(gem_color_info("Diamond").icon, '◇');
}

#[test]
fn unknown_color_falls_back() {
    let info = gem_color_info("Jade");
    assert_eq!(info.name, "Jade");
    assert_eq!(info.hex_color, "#999999");
    assert_eq!(info.icon, '◆');
    assert_eq!(info.description, "Jade gem");
}

#[test]
fn lookup_is_case_sensitive() {
    assert_eq!(gem_color_info("ruby").hex_color, FALLBACK_GEM_HEX);
}

#[test]
fn contrast_picks_black_on_light_and_white_on_dark() {
    assert_eq!(contrasting_text_color("#E8E8E8"), "#000000");
    assert_eq!(contrasting_text_color("#FFD700"), "#000000");
    assert_eq!(contrasting_text_color("#1A1A1A"), "#FFFFFF");
    assert_eq!(contrasting_text_color("#0047AB"), "#FFFFFF");
}

#[test]
fn contrast_of_invalid_hex_is_white() {
    assert_eq!(contrasting_text_color("not a color"), "#FFFFFF");
}

#[test]
fn cost_text_lists_each_gem() {
    assert_eq!(gem_cost_text("Ruby", 2, 1), "ruby, ruby, uncolored");
    assert_eq!(gem_cost_text("Ruby", 0, 0), "no cost");
}

#[test]
fn glyphs_follow_gem_counts() {
    assert_eq!(gem_glyphs("Emerald", 2, 2), "◆◆◇◇");
    assert_eq!(gem_glyphs("Diamond", 1, 0), "◇");
    assert_eq!(gem_glyphs("Ruby", 0, 0), "");
}

#[test]
fn rarity_colors() {
    assert_eq!(rarity_color(&Rarity::Mythic), "#9c3c0f");
    assert_eq!(rarity_color(&Rarity::AlternateArt), "#c2a000");
    assert_eq!(rarity_color(&Rarity::Other("Promo".into())), FALLBACK_RARITY_HEX);
}
