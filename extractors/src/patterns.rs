use regex::Regex;
use shared_types::{Category, PaymentMode};

/// Regexes for the credit-card extraction path. Each list is ordered from
/// most-specific to most-generic; the first match wins per field.
pub struct CardPatterns {
    pub card_number: Vec<Regex>,
    pub transaction_amounts: Vec<Regex>,
    pub merchants: Vec<Regex>,
    pub available_limit: Vec<Regex>,
    pub total_limit: Vec<Regex>,
    pub min_due: Vec<Regex>,
    pub due_date: Vec<Regex>,
    /// Two capture groups: period start and period end
    pub statement_period: Vec<Regex>,
    pub reward_points: Vec<Regex>,
}

/// Regexes for payment-confirmation emails
pub struct PaymentPatterns {
    pub amounts: Vec<Regex>,
    pub modes: Vec<Regex>,
    pub references: Vec<Regex>,
}

/// Regexes for one non-card spend category. `cues` contribute to
/// content-fallback scoring only, never to field extraction.
pub struct SpendPatterns {
    pub amounts: Vec<Regex>,
    pub merchants: Vec<Regex>,
    pub cues: Vec<Regex>,
}

impl SpendPatterns {
    /// Total number of matches across every pattern in this category,
    /// used to break ties in the content-fallback path
    pub fn match_count(&self, text: &str) -> usize {
        self.amounts
            .iter()
            .chain(self.merchants.iter())
            .chain(self.cues.iter())
            .map(|re| re.find_iter(text).count())
            .sum()
    }
}

/// The static pattern and keyword tables every extractor works from.
/// Purely declarative: adding an issuer or category means editing the
/// tables in [`PatternLibrary::new`], not the extraction logic. Compiled
/// once at process start and shared by reference; no runtime mutation.
pub struct PatternLibrary {
    /// Category -> company/issuer keywords matched against the sender
    /// address. Declaration order is the tie-break for sender routing.
    pub(crate) category_companies: Vec<(Category, Vec<&'static str>)>,
    pub(crate) promotional_keywords: Vec<&'static str>,
    /// Keywords that veto the promotional filter in addition to the
    /// transaction and payment sets (statement mails mention rewards too)
    pub(crate) statement_keywords: Vec<&'static str>,
    pub(crate) transaction_keywords: Vec<&'static str>,
    pub(crate) payment_keywords: Vec<&'static str>,
    pub(crate) card: CardPatterns,
    pub(crate) payment: PaymentPatterns,
    /// Fallback-scored spend categories, in declaration order
    pub(crate) spend: Vec<(Category, SpendPatterns)>,
    pub(crate) mode_keywords: Vec<(PaymentMode, Vec<&'static str>)>,
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

impl PatternLibrary {
    pub fn new() -> Self {
        Self {
            category_companies: vec![
                (
                    Category::CreditCards,
                    vec![
                        "hdfc",
                        "icici",
                        "sbi",
                        "axis",
                        "kotak",
                        "yes",
                        "idfc",
                        "indusind",
                        "rbl",
                        "federal",
                        "dcb",
                        "bandhan",
                        "aubank",
                        "standardchartered",
                        "hsbc",
                        "dbs",
                        "slice",
                        "onecard",
                        "amex",
                        "citi",
                    ],
                ),
                (Category::FoodDining, vec!["zomato", "swiggy"]),
                (Category::TravelTransport, vec!["uber", "ola", "rapido"]),
                (
                    Category::ShoppingRetail,
                    vec![
                        "amazon",
                        "flipkart",
                        "myntra",
                        "ajio",
                        "bigbasket",
                        "dmart",
                        "tatacliq",
                        "nykaa",
                        "meesho",
                    ],
                ),
                (Category::Financial, vec!["zerodha", "groww", "upstox"]),
            ],

            promotional_keywords: vec![
                "offer",
                "cashback",
                "reward",
                "pre-approved",
                "discount",
                "sale",
                "voucher",
                "exclusive",
                "congratulations",
            ],
            statement_keywords: vec![
                "amount due",
                "statement",
                "credit limit",
                "available limit",
            ],
            transaction_keywords: vec![
                "transaction alert",
                "spent",
                "debited",
                "charged",
                "purchase",
                "has been used",
                "for using",
                "transaction of",
            ],
            payment_keywords: vec![
                "payment received",
                "payment confirmed",
                "thank you for your payment",
                "payment credited",
                "amount credited",
                "payment processed",
                "payment successful",
            ],

            card: CardPatterns {
                card_number: compile(&[
                    r"(?i)(?:credit\s+card|card)\s+ending\s+(?:in\s+)?(\d{4})",
                    r"(?i)(?:credit\s+card|card)\s+(?:account\s+)?[Xx\*]+\s*(\d{4})",
                    r"(?i)card\s+(?:no\.?|number)\s*[:.]?\s*[Xx\*]*(\d{4})",
                ]),
                transaction_amounts: compile(&[
                    r"(?i)(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)\s+(?:was\s+)?(?:spent|debited|charged)",
                    r"(?i)(?:transaction|purchase)\s+of\s+(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)",
                    r"(?i)(?:charged|debited)\s+(?:for\s+)?(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)",
                    r"(?i)(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)\s+(?:at|@)",
                ]),
                merchants: compile(&[
                    r"(?i)at\s+([A-Za-z0-9\s&\-\.]+?)\s+using",
                    r"(?i)at\s+([A-Za-z0-9\s&\-\.]+?)\s+on\s+\d{2}-\d{2}-\d{4}",
                    r"(?i)Info\s*:\s*([A-Za-z0-9\s&\-\.]+?)(?:\.|$)",
                    r"(?i)at\s+([A-Za-z0-9\s&\-\.]+?)\.\s+(?:The\s+)?Available",
                ]),
                available_limit: compile(&[
                    r"(?i)available\s+(?:credit\s+)?limit(?:\s+on\s+your\s+card)?\s*(?:is|:)?\s*(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)",
                ]),
                total_limit: compile(&[
                    r"(?i)total\s+(?:credit\s+)?limit(?:\s+is)?\s*:?\s*(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)",
                    r"(?i)credit\s+limit\s*(?:is|:)?\s*(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)",
                ]),
                min_due: compile(&[
                    r"(?i)(?:minimum|min)\s+(?:amount\s+)?(?:payment\s+)?due\s*:?\s*(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)",
                ]),
                due_date: compile(&[
                    r"(?i)(?:due|payment)\s+date\s*:?\s*(\d{1,2}[-/]\d{1,2}[-/]\d{4})",
                    r"(?i)due\s+(?:on|by)\s*:?\s*(\d{1,2}[-/]\d{1,2}[-/]\d{4})",
                ]),
                statement_period: compile(&[
                    r"(?i)(?:statement|billing)\s+period\s*:?\s*(\d{1,2}[-/]\d{1,2}[-/]\d{4})\s*(?:to|-)\s*(\d{1,2}[-/]\d{1,2}[-/]\d{4})",
                ]),
                reward_points: compile(&[
                    r"(?i)reward\s+points?\s*(?:balance)?\s*:?\s*(\d+)",
                    r"(?i)(\d+)\s+reward\s+points?",
                ]),
            },

            payment: PaymentPatterns {
                amounts: compile(&[
                    r"(?i)payment\s+of\s+(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)",
                    r"(?i)amount\s+of\s+(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)\s+credited",
                    r"(?i)(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)\s+(?:has\s+been\s+)?credited",
                ]),
                modes: compile(&[
                    r"(?i)(?:via|through|mode:|method:)\s+(UPI|NEFT|IMPS|RTGS|Net\s*Banking|wallet)",
                    r"(?i)paid\s+(?:using|through|by)\s+([A-Za-z\s]+)",
                ]),
                references: compile(&[
                    r"(?i)reference(?:\s+number)?\s*[:.]\s*([A-Z0-9]+)",
                    r"(?i)ref\s*(?:no)?\.?\s*:\s*([A-Z0-9]+)",
                ]),
            },

            spend: vec![
                (
                    Category::FoodDining,
                    SpendPatterns {
                        amounts: compile(&[
                            r"(?i)amount\s+paid\s*:\s*(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)",
                            r"(?i)(?:amount|total)\s*:\s*(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)",
                            r"(?i)order\s+(?:total|value)\s*:?\s*(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)",
                        ]),
                        merchants: compile(&[
                            r"(?i)Order\s+(?:Confirmed|Ready)\s*:\s*([A-Za-z0-9\s&\-'\.]+?)\s+\(Order\s+#",
                            r"(?i)(?:your\s+)?order\s+from\s+([A-Za-z0-9\s&\-'\.]+?)(?:\s+is|\s+has|!|\.|$)",
                            r"(?i)from\s+([A-Za-z0-9\s&\-'\.]+?)(?:\s+is\s+confirmed|\s+is\s+ready|\s+is\s+on)",
                            r"(?i)([A-Za-z0-9\s&\-'\.]+?)\s+Order\s+#[A-Z0-9]+",
                        ]),
                        cues: compile(&[
                            r"(?i)order\s+(?:confirmed|delivered|ready)",
                            r"(?i)\bdelivery\b",
                            r"(?i)\brestaurant\b",
                        ]),
                    },
                ),
                (
                    Category::TravelTransport,
                    SpendPatterns {
                        amounts: compile(&[
                            r"(?i)(?:estimated\s+)?fare\s*:\s*(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)",
                            r"(?i)(?:fare|amount)(?:\s+paid)?\s*:\s*(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)",
                        ]),
                        merchants: compile(&[
                            r"(?i)Your\s+([A-Za-z]+(?:\s+(?:Prime|Mini|Auto|Outstation|XL|Premier|bike))?)\s+(?:booking|ride)",
                            r"(?i)([A-Za-z]+(?:\s+(?:Prime|Mini|Auto|Outstation|XL|Premier))?)\s+(?:ride|booking)\s+(?:is\s+)?confirmed",
                        ]),
                        cues: compile(&[
                            r"(?i)\bride\b",
                            r"(?i)\bbooking\b",
                            r"(?i)\bfare\b",
                            r"(?i)\bdriver\b",
                        ]),
                    },
                ),
                (
                    Category::ShoppingRetail,
                    SpendPatterns {
                        amounts: compile(&[
                            r"(?i)total(?:\s+amount)?\s*:\s*(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)",
                            r"(?i)amount\s*:\s*(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)",
                            r"(?i)order\s+total\s*:?\s*(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)",
                        ]),
                        merchants: compile(&[
                            r"(?i)Order\s+(?:Confirmation|confirmed)\s+from\s+([A-Za-z\s]+?)(?:!|\.|$)",
                            r"(?i)([A-Za-z]+(?:\.[a-z]+)?)\s+order\s+(?:#|ID:)\s*[A-Z0-9\-]+",
                            r"(?i)Order\s+(?:from|at)\s+([A-Za-z\s&\-\.]+?)(?:!|\.|$)",
                        ]),
                        cues: compile(&[
                            r"(?i)\bshipped\b",
                            r"(?i)\bdelivered\b",
                            r"(?i)order\s+#",
                            r"(?i)\btracking\b",
                        ]),
                    },
                ),
                (
                    Category::Financial,
                    SpendPatterns {
                        amounts: compile(&[
                            r"(?i)total\s+(?:investment|value|amount)\s*:\s*(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)",
                            r"(?i)(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)\s+invested",
                            r"(?i)amount\s*:\s*(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)\s+redeemed",
                            r"(?i)amount\s*:\s*(?:INR|Rs\.?|₹)\s*([\d,]+(?:\.\d{2})?)",
                        ]),
                        merchants: compile(&[
                            r"(?i)(?:shares\s+of|in)\s+([A-Z][A-Z\s]+?)\s+(?:at|@)",
                            r"(?i)invested\s+in\s+([A-Za-z\s]+\s+Fund)",
                            r"(?i)([A-Za-z\s]+\s+Fund)\s+(?:Units|NAV)",
                        ]),
                        cues: compile(&[
                            r"(?i)\bshares\b",
                            r"(?i)mutual\s+fund",
                            r"(?i)\binvested\b",
                            r"(?i)\bNAV\b",
                        ]),
                    },
                ),
            ],

            mode_keywords: vec![
                (PaymentMode::Upi, vec!["upi"]),
                (
                    PaymentMode::Netbanking,
                    vec!["neft", "imps", "rtgs", "netbanking", "net banking"],
                ),
                (
                    PaymentMode::Card,
                    vec!["credit card", "debit card", "card ending", "using card", "by card"],
                ),
                (
                    PaymentMode::Wallet,
                    vec!["wallet", "paytm", "phonepe", "mobikwik"],
                ),
                (
                    PaymentMode::Cash,
                    vec!["cash on delivery", "paid in cash", "by cash"],
                ),
            ],
        }
    }

    /// First configured category whose company keywords appear in the
    /// sender address; declaration order is the tie-break
    pub fn sender_category(&self, sender: &str) -> Option<Category> {
        self.category_companies
            .iter()
            .find(|(_, companies)| companies.iter().any(|c| sender.contains(c)))
            .map(|(category, _)| *category)
    }

    /// Card issuer keyword found in the sender address, if any
    pub fn issuer_for(&self, sender: &str) -> Option<&'static str> {
        self.category_companies
            .iter()
            .find(|(category, _)| *category == Category::CreditCards)
            .and_then(|(_, issuers)| issuers.iter().find(|i| sender.contains(*i)))
            .copied()
    }

    /// Field patterns for a non-card spend category
    pub fn spend_patterns(&self, category: Category) -> Option<&SpendPatterns> {
        self.spend
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, patterns)| patterns)
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-sensitive containment over an already-lowercased haystack
pub(crate) fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}
