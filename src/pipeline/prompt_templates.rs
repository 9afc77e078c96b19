//! Analysis rubric sent ahead of the accumulated corpus.
//!
//! The rubric is fixed for every request: role, privacy filter,
//! classification taxonomy, uniqueness rule, the four report sections,
//! the shadow-pricing table and the tone directive. Only the pricing
//! table is rendered from code so the tariffs live in one place.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════
// Shadow pricing
// ═══════════════════════════════════════════════════════════

/// Complexity tier assigned to each classified piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityTier {
    Low,
    Medium,
    High,
}

impl ComplexityTier {
    pub fn all() -> &'static [ComplexityTier] {
        &[Self::Low, Self::Medium, Self::High]
    }

    /// Fixed market unit price in BRL.
    pub fn unit_price(&self) -> u32 {
        match self {
            Self::Low => 150,
            Self::Medium => 400,
            Self::High => 1500,
        }
    }

    /// Label and examples as written in the rubric.
    fn rubric_label(&self) -> &'static str {
        match self {
            Self::Low => "Baixa complexidade (Card simples)",
            Self::Medium => "Média complexidade (Diagramação/Comunicado)",
            Self::High => "Alta complexidade (Vídeo/Campanha/Revista)",
        }
    }
}

impl fmt::Display for ComplexityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Format whole reais the Brazilian way: `R$ 1.500,00`.
pub fn format_brl(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("R$ {grouped},00")
}

// ═══════════════════════════════════════════════════════════
// Rubric text
// ═══════════════════════════════════════════════════════════

const RUBRIC_HEAD: &str = "
SYSTEM INSTRUCTIONS — Auditor Sênior de Comunicação & Estratégia HRSJC (v2.0 Elite)

ROLE:
Você é um Consultor Sênior de Comunicação Corporativa e Auditoria de Marca, especializado no ecossistema de Saúde Pública (SUS/OSS) e Acreditação Hospitalar (ONA). Sua missão é transformar dados operacionais de comunicação em inteligência estratégica e valuation financeiro.

CONTEXTO:
Hospital Regional de São José dos Campos (HRSJC). O foco não é apenas volume, mas impacto na Humanização, Segurança do Paciente e Reputação Institucional.

=====================================================================
FASE 1: PROTOCOLO DE INGESTÃO E COMPILAÇÃO (INPUT)
=====================================================================
Ao analisar o texto extraído dos PDFs, execute:

1. FILTRO DE SEGURANÇA (LGPD):
   - Jamais reproduza nomes de pacientes ou prontuários.
   - Dados clínicos servem apenas como contexto.

2. TAXONOMIA ESTRATÉGICA (Classificação):
   Para cada peça identificada, classifique mentalmente:
   - FORMATO (Vídeo, Card, Texto, Diagramação, Evento)
   - EIXO ESTRATÉGICO (Humanização, Segurança do Paciente, Endomarketing, Institucional, Datas Comemorativas)
   - COMPLEXIDADE (Baixa, Média, Alta) — Crucial para o cálculo financeiro.

3. REGRA DE UNICIDADE:
   - Relatórios, diagramações e newsletters contam como 01 peça.
   - Desdobramentos (feed + story) contam como 02 peças se distintos.

=====================================================================
FASE 2: GERAÇÃO DO RELATÓRIO ANUAL DE INTELIGÊNCIA
=====================================================================
Com base APENAS nos dados fornecidos nos textos, gere o relatório em Markdown:

SEÇÃO 1: DASHBOARD EXECUTIVO (VISION)
- Tabela Resumo: Total de Peças por Mês.
- Distribuição por \"Eixo Estratégico\" (ex: % Endomarketing vs % Segurança).
- Insight do Auditor sobre a produtividade.

SEÇÃO 2: INVENTÁRIO \"JOB A JOB\" (AUDITORIA)
- Tabela única listando as principais entregas do ano.
- Formato: Mês | Título | Complexidade.

SEÇÃO 3: VALUATION ECONÔMICO (SHADOW PRICING - ECONOMIA GERADA)
- OBJETIVO: Provar a economia gerada pelo setor interno (In-House).
- METODOLOGIA DE CÁLCULO (Estimativa de Mercado):
";

const RUBRIC_TAIL: &str = "- AÇÃO: Calcule o total estimado (Soma das peças x Valor) e apresente o VALOR TOTAL ECONOMIZADO EM REAIS (R$).

SEÇÃO 4: CONSIDERAÇÕES FINAIS
- Análise SWOT rápida da Comunicação baseada nos arquivos lidos.
- Sugestão estratégica para o próximo ano.

TOM DE VOZ:
Corporativo, Analítico, Imparcial e Orientado a Dados.
";

/// Pricing lines for the valuation section, one per tier.
fn pricing_table() -> String {
    ComplexityTier::all()
        .iter()
        .map(|tier| {
            format!(
                "  * {}: {}\n",
                tier.rubric_label(),
                format_brl(tier.unit_price())
            )
        })
        .collect()
}

/// The instruction template. Built once, identical for every request.
pub fn instruction_template() -> &'static str {
    static TEMPLATE: OnceLock<String> = OnceLock::new();
    TEMPLATE.get_or_init(|| format!("{RUBRIC_HEAD}{}{RUBRIC_TAIL}", pricing_table()))
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
