//! UBL-TR fixture builders shared by the integration tests.

#![allow(dead_code)]

pub const NAMESPACES: &str = concat!(
    r#"xmlns="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2" "#,
    r#"xmlns:cac="urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2" "#,
    r#"xmlns:cbc="urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2""#,
);

/// One `<cac:InvoiceLine>` with a single KDV subtotal.
pub struct Line<'a> {
    pub item: &'a str,
    pub quantity: &'a str,
    pub taxable: &'a str,
    pub tax: &'a str,
    pub percent: &'a str,
    pub currency: &'a str,
}

impl<'a> Line<'a> {
    pub fn new(item: &'a str, quantity: &'a str, taxable: &'a str, tax: &'a str) -> Self {
        Self {
            item,
            quantity,
            taxable,
            tax,
            percent: "20",
            currency: "TRY",
        }
    }

    pub fn currency(mut self, currency: &'a str) -> Self {
        self.currency = currency;
        self
    }

    pub fn to_xml(&self, id: usize) -> String {
        let Line {
            item,
            quantity,
            taxable,
            tax,
            percent,
            currency,
        } = self;
        format!(
            r#"<cac:InvoiceLine>
    <cbc:ID>{id}</cbc:ID>
    <cbc:InvoicedQuantity unitCode="C62">{quantity}</cbc:InvoicedQuantity>
    <cbc:LineExtensionAmount currencyID="{currency}">{taxable}</cbc:LineExtensionAmount>
    <cac:TaxTotal>
      <cbc:TaxAmount currencyID="{currency}">{tax}</cbc:TaxAmount>
      <cac:TaxSubtotal>
        <cbc:TaxableAmount currencyID="{currency}">{taxable}</cbc:TaxableAmount>
        <cbc:TaxAmount currencyID="{currency}">{tax}</cbc:TaxAmount>
        <cbc:Percent>{percent}</cbc:Percent>
        <cac:TaxCategory>
          <cac:TaxScheme>
            <cbc:Name>KDV</cbc:Name>
            <cbc:TaxTypeCode>0015</cbc:TaxTypeCode>
          </cac:TaxScheme>
        </cac:TaxCategory>
      </cac:TaxSubtotal>
    </cac:TaxTotal>
    <cac:Item><cbc:Name>{item}</cbc:Name></cac:Item>
  </cac:InvoiceLine>"#
        )
    }
}

/// An `<Invoice>` element carrying its own namespace declarations, so it
/// can stand alone or be embedded in a larger document.
pub struct Invoice<'a> {
    pub id: &'a str,
    pub issue_date: Option<&'a str>,
    pub supplier: Option<(&'a str, &'a str)>,
    pub lines: Vec<Line<'a>>,
}

impl<'a> Invoice<'a> {
    pub fn new(id: &'a str, issue_date: &'a str) -> Self {
        Self {
            id,
            issue_date: Some(issue_date),
            supplier: Some(("Örnek Ticaret A.Ş.", "1234567890")),
            lines: Vec::new(),
        }
    }

    pub fn line(mut self, line: Line<'a>) -> Self {
        self.lines.push(line);
        self
    }

    pub fn supplier(mut self, name: &'a str, vkn: &'a str) -> Self {
        self.supplier = Some((name, vkn));
        self
    }

    pub fn without_issue_date(mut self) -> Self {
        self.issue_date = None;
        self
    }

    pub fn without_supplier(mut self) -> Self {
        self.supplier = None;
        self
    }

    pub fn to_element(&self) -> String {
        let mut xml = format!(
            "<Invoice {NAMESPACES}>\n  <cbc:UBLVersionID>2.1</cbc:UBLVersionID>\n  \
             <cbc:CustomizationID>TR1.2</cbc:CustomizationID>\n  <cbc:ProfileID>TICARIFATURA</cbc:ProfileID>\n  \
             <cbc:ID>{}</cbc:ID>\n",
            self.id
        );
        if let Some(date) = self.issue_date {
            xml.push_str(&format!("  <cbc:IssueDate>{date}</cbc:IssueDate>\n"));
        }
        xml.push_str("  <cbc:DocumentCurrencyCode>TRY</cbc:DocumentCurrencyCode>\n");
        if let Some((name, vkn)) = self.supplier {
            xml.push_str(&format!(
                r#"  <cac:AccountingSupplierParty>
    <cac:Party>
      <cac:PartyIdentification><cbc:ID schemeID="MERSISNO">0123456789000015</cbc:ID></cac:PartyIdentification>
      <cac:PartyIdentification><cbc:ID schemeID="VKN">{vkn}</cbc:ID></cac:PartyIdentification>
      <cac:PartyName><cbc:Name>{name}</cbc:Name></cac:PartyName>
    </cac:Party>
  </cac:AccountingSupplierParty>
"#
            ));
        }
        xml.push_str(
            r#"  <cac:AccountingCustomerParty>
    <cac:Party>
      <cac:PartyIdentification><cbc:ID schemeID="VKN">9876543210</cbc:ID></cac:PartyIdentification>
      <cac:PartyName><cbc:Name>Alıcı Ltd. Şti.</cbc:Name></cac:PartyName>
    </cac:Party>
  </cac:AccountingCustomerParty>
"#,
        );
        for (i, line) in self.lines.iter().enumerate() {
            xml.push_str("  ");
            xml.push_str(&line.to_xml(i + 1));
            xml.push('\n');
        }
        xml.push_str("</Invoice>");
        xml
    }

    /// A complete document with an XML declaration.
    pub fn to_document(&self) -> String {
        format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}", self.to_element())
    }
}

/// A document holding several `<Invoice>` elements.
pub fn batch_document(invoices: &[Invoice<'_>]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Batch>\n");
    for invoice in invoices {
        xml.push_str(&invoice.to_element());
        xml.push('\n');
    }
    xml.push_str("</Batch>");
    xml
}
