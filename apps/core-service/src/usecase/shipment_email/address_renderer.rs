//! # アドレスレンダラー
//!
//! 住所を表示形式（HTML / テキスト / 1 行）の文字列に変換する。

use shipmail_domain::address::{Address, AddressFormat};

/// 住所の表示文字列化
pub trait AddressRenderer: Send + Sync {
    fn format(&self, address: &Address, format: AddressFormat) -> String;
}

/// 既定のアドレスレンダラー
///
/// 行構成: 氏名 / 会社名 / 番地（複数行）/ 市区町村・都道府県・郵便番号 / 国 / 電話番号。
/// HTML 形式では各行をエスケープして `<br />` で連結する。
#[derive(Debug, Clone, Default)]
pub struct DefaultAddressRenderer;

impl DefaultAddressRenderer {
    fn lines(address: &Address) -> Vec<String> {
        let mut lines = vec![address.name()];
        lines.extend(address.company.iter().cloned());
        lines.extend(address.street.iter().cloned());

        let locality = [
            Some(address.city.as_str()),
            address.region.as_deref(),
            Some(address.postcode.as_str()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
        lines.push(locality);
        lines.push(address.country_id.clone());
        lines.extend(address.telephone.iter().map(|tel| format!("T: {tel}")));

        lines.retain(|line| !line.trim().is_empty());
        lines
    }
}

impl AddressRenderer for DefaultAddressRenderer {
    fn format(&self, address: &Address, format: AddressFormat) -> String {
        let lines = Self::lines(address);
        match format {
            AddressFormat::Html => lines
                .iter()
                .map(|line| tera::escape_html(line.as_str()))
                .collect::<Vec<_>>()
                .join("<br />"),
            AddressFormat::Text => lines.join("\n"),
            AddressFormat::Oneline => lines.join(", "),
        }
    }
}
