//! Menu texts shared by the built-in trees.
//!
//! `{contact}`/`{CONTACT}` and form fields are placeholders resolved at
//! send time; the business name is baked in (brace-escaped) when the tree
//! is built.

use crate::template::escape;

pub const MAIN_MENU_ITEMS: &str = "1️⃣  PLANOS E VALORES\n\
2️⃣  PROMOÇÕES ESPECIAIS\n\
3️⃣  AGENDAR AULA EXPERIMENTAL\n\
4️⃣  INFORMAÇÕES DA ACADEMIA\n\
5️⃣  FALAR COM ATENDENTE";

pub const EXIT_ITEM: &str = "6️⃣  ENCERRAR ATENDIMENTO";

pub fn main_menu(items: &str) -> String {
    format!("📋 *MENU PRINCIPAL*\n\n{items}")
}

pub fn greeting(business: &str, items: &str) -> String {
    let business = escape(business);
    format!(
        "👋 *OLÁ {{CONTACT}}!* 😊\n\n\
         Sou o assistente virtual da *{business}*! 💪\n\n\
         *MENU PRINCIPAL* 📋\n\n\
         *Digite o número da opção desejada:*\n\n\
         {items}\n\n\
         👉 *EXEMPLO: Digite \"1\" para ver nossos planos*"
    )
}

pub fn menu_invalid(last: u8) -> String {
    let mut text = format!(
        "❌ *OPÇÃO INVÁLIDA!*\n\n\
         Por favor, digite apenas números de 1 a {last}.\n\n\
         *EXEMPLOS:*\n\
         • Digite \"1\" para Planos\n\
         • Digite \"2\" para Promoções\n\
         • Digite \"3\" para Agendar Aula\n\
         • Digite \"4\" para Informações\n\
         • Digite \"5\" para Atendente Humano\n"
    );
    if last >= 6 {
        text.push_str("• Digite \"6\" para Encerrar\n");
    }
    text.push_str("\n0️⃣  PARA REPETIR O MENU");
    text
}

pub const APOLOGY: &str = "😕 *Desculpe, ocorreu um erro.*\n\n\
Por favor, digite \"0\" para voltar ao menu principal.";

pub const ONLY_NUMBERS: &str = "❌ Digite apenas números.";

pub const BACK_TO_MENU: &str = "0️⃣  VOLTAR AO MENU PRINCIPAL";

pub fn plans_list(extra: &str) -> String {
    format!(
        "💪 *NOSSOS PLANOS* 💰\n\n\
         *Digite o número do plano que deseja conhecer:*\n\n\
         1️⃣  PLANO MENSAL - R$ 120,00\n\
         2️⃣  PLANO TRIMESTRAL - R$ 100,00/mês\n\
         3️⃣  PLANO SEMESTRAL - R$ 95,00/mês\n\
         4️⃣  PLANO ANUAL - R$ 89,90/mês (25% OFF!)\n\
         {extra}\n\
         {BACK_TO_MENU}"
    )
}

const PLAN_FOOTER: &str = "1️⃣  CONTRATAR ESTE PLANO\n2️⃣  FALAR COM VENDEDOR\n0️⃣  VOLTAR";

pub fn plan_monthly() -> String {
    format!(
        "📋 *PLANO MENSAL*\n\n\
         ✅ Acesso ilimitado à academia\n\
         ✅ Uso de todos equipamentos\n\
         ✅ Aulas em grupo inclusas\n\
         ✅ Área de musculação e cardio\n\n\
         💰 *Valor:* R$ 120,00/mês\n\n\
         {PLAN_FOOTER}"
    )
}

pub fn plan_quarterly() -> String {
    format!(
        "📋 *PLANO TRIMESTRAL*\n\n\
         ✅ Todos benefícios do plano mensal\n\
         ✅ Economia de 16%\n\
         ✅ Renovação automática\n\
         ✅ 1 avaliação física gratuita\n\n\
         💰 *Valor:* R$ 100,00/mês (R$ 300,00 total)\n\n\
         {PLAN_FOOTER}"
    )
}

pub fn plan_semiannual() -> String {
    format!(
        "📋 *PLANO SEMESTRAL*\n\n\
         ✅ Economia de 20%\n\
         ✅ Upgrade gratuito após 3 meses\n\
         ✅ 2 meses de academia online\n\
         ✅ 2 avaliações físicas\n\n\
         💰 *Valor:* R$ 95,00/mês (R$ 570,00 total)\n\n\
         {PLAN_FOOTER}"
    )
}

pub fn plan_annual() -> String {
    format!(
        "📋 *PLANO ANUAL*\n\n\
         ✅ Economia de 25%\n\
         ✅ Matrícula GRÁTIS\n\
         ✅ 3 meses de academia online\n\
         ✅ Assessoria nutricional\n\
         ✅ 4 avaliações físicas\n\
         ✅ Cadeira de massagem\n\n\
         💰 *Valor:* R$ 89,90/mês (R$ 1.078,80 total)\n\n\
         {PLAN_FOOTER}"
    )
}

pub fn plans_invalid(last: u8) -> String {
    format!("❌ Digite um número de 1 a {last} ou 0 para voltar.")
}

pub const PLANS_ONLY_NUMBERS: &str = "❌ Por favor, digite apenas números.";

pub fn promo_list() -> String {
    format!(
        "🔥 *PROMOÇÕES ATIVAS* 🎁\n\n\
         *Escolha uma promoção:*\n\n\
         1️⃣  PROJETO VERÃO - Matrícula GRÁTIS!\n\
         2️⃣  INDICAÇÃO PREMIADA - Ganhe 1 mês!\n\
         3️⃣  PLANO DUPLO - 20% de desconto!\n\n\
         {BACK_TO_MENU}"
    )
}

pub const PROMO_SUMMER: &str = "🎉 *PROJETO VERÃO CONFIRMADO!*\n\n\
✅ Matrícula totalmente GRÁTIS!\n\
✅ Plano anual com desconto máximo\n\
✅ Kit boas-vindas (toalha + squeeze)\n\n\
📅 *Válido até:* 31/12/2024\n\n\
1️⃣  QUERO GARANTIR ESTA OFERTA!\n\
2️⃣  FALAR COM CONSULTOR\n\
0️⃣  VOLTAR";

pub const PROMO_REFERRAL: &str = "👥 *INDICAÇÃO PREMIADA*\n\n\
Indique um amigo e ambos ganham:\n\
✅ 1 mês GRÁTIS na mensalidade!\n\
✅ Acesso VIP por 30 dias\n\n\
1️⃣  QUERO INDICAR UM AMIGO\n\
2️⃣  MAIS DETALHES\n\
0️⃣  VOLTAR";

pub const PROMO_DUO: &str = "👨‍👩‍👧‍👦 *PLANO DUPLO/FAMILIAR*\n\n\
20% de desconto para:\n\
✅ Casais\n\
✅ Famílias\n\
✅ Amigos (mínimo 2 pessoas)\n\n\
1️⃣  SOLICITAR ORÇAMENTO\n\
2️⃣  CONDIÇÕES\n\
0️⃣  VOLTAR";

pub const PROMO_INVALID: &str = "❌ Digite 1, 2, 3 ou 0.";

pub fn schedule_intro() -> String {
    format!(
        "📅 *AGENDAR AULA EXPERIMENTAL* 🏋️‍♂️\n\n\
         *Digite:*\n\n\
         1️⃣  PARA AGENDAR AGORA\n\
         2️⃣  VER HORÁRIOS DISPONÍVEIS\n\n\
         {BACK_TO_MENU}"
    )
}

pub const AVAILABILITY: &str = "⏰ *HORÁRIOS DISPONÍVEIS*\n\n\
📅 *Próximas vagas:*\n\
• Amanhã: 9h, 14h, 18h\n\
• Quarta-feira: 10h, 16h\n\
• Sexta-feira: 9h, 15h, 19h\n\n\
1️⃣  AGENDAR AGORA\n\
0️⃣  VOLTAR";

pub const SCHEDULE_INVALID: &str = "❌ Opção inválida. Digite 1, 2 ou 0.";

/// Bookable trial-class slots, indexed by digit - 1.
pub const SLOTS: [&str; 6] = [
    "SEGUNDA - 9:00 às 10:00",
    "TERÇA - 14:00 às 15:00",
    "QUARTA - 18:00 às 19:00",
    "QUINTA - 10:00 às 11:00",
    "SEXTA - 16:00 às 17:00",
    "SÁBADO - 11:00 às 12:00",
];

const KEYCAPS: [&str; 10] = ["0️⃣", "1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣", "7️⃣", "8️⃣", "9️⃣"];

pub fn slot_list() -> String {
    let mut text = String::from("📅 *AGENDAMENTO RÁPIDO*\n\n*Escolha um horário:*\n\n");
    for (i, slot) in SLOTS.iter().enumerate() {
        text.push_str(KEYCAPS[i + 1]);
        text.push_str("  ");
        text.push_str(slot);
        text.push('\n');
    }
    text.push_str("\n0️⃣  VOLTAR");
    text
}

pub fn slot_invalid() -> String {
    format!(
        "❌ Opção inválida. Digite um número de 1 a {} ou 0 para voltar.",
        SLOTS.len()
    )
}

const VISIT_TIPS: &str = "⚠️ *Recomendações:*\n\
• Chegar 15 minutos antes\n\
• Trazer RG ou CPF\n\
• Usar roupas confortáveis\n\
• Trazer toalha de rosto\n\n\
*Estamos ansiosos para recebê-lo!* 🏋️‍♂️";

/// Booking confirmation. `who` is the placeholder holding the attendee name.
pub fn booked(who: &str) -> String {
    format!(
        "✅ *AULA EXPERIMENTAL AGENDADA!*\n\n\
         👤 *Nome:* {{{who}}}\n\
         📅 *Data/Horário:* {{time}}\n\
         📍 *Local:* Rua dos Atletas, 123\n\
         📞 *Telefone:* (11) 9999-9999\n\n\
         {VISIT_TIPS}"
    )
}

pub fn academy_info() -> String {
    format!(
        "🏢 *INFORMAÇÕES DA ACADEMIA* 📍\n\n\
         📍 *Endereço:* Rua dos Atletas, 123 - Centro\n\n\
         ⏰ *Horário de Funcionamento:*\n\
         • Segunda a Sexta: 6h às 23h\n\
         • Sábados: 8h às 20h\n\
         • Domingos: 9h às 14h\n\n\
         🏋️‍♂️ *Estrutura:*\n\
         • 200+ equipamentos\n\
         • 3 salas de aula\n\
         • Piscina semi-olímpica\n\
         • Estacionamento gratuito\n\n\
         {BACK_TO_MENU}"
    )
}

pub fn human_intro() -> String {
    format!(
        "👨‍💼 *ATENDIMENTO HUMANO* 📞\n\n\
         Um de nossos consultores entrará em contato em breve!\n\n\
         📞 *Telefone:* (11) 9999-9999\n\
         📧 *E-mail:* contato@devfit.com.br\n\n\
         ⏳ *Tempo de resposta:* até 2 horas úteis\n\n\
         {BACK_TO_MENU}"
    )
}

pub const HUMAN_ACK: &str = "✅ *SOLICITAÇÃO REGISTRADA!*\n\n\
Um de nossos consultores entrará em contato em breve.\n\n\
📞 *Contato alternativo:* (11) 9999-9999\n\
⏳ *Tempo médio de resposta:* 1-2 horas úteis\n\n\
0️⃣  VOLTAR AO MENU";

// --- Extended variant only ---

pub const PAYMENT_ITEM: &str = "5️⃣  FORMAS DE PAGAMENTO";

pub fn payment_list() -> String {
    format!(
        "💳 *FORMAS DE PAGAMENTO*\n\n\
         1️⃣  CARTÃO DE CRÉDITO\n\
         2️⃣  PIX\n\
         3️⃣  BOLETO BANCÁRIO\n\n\
         {BACK_TO_MENU}"
    )
}

pub const PAYMENT_CARD: &str = "💳 *CARTÃO DE CRÉDITO*\n\n\
✅ Todas as bandeiras\n\
✅ Planos trimestral, semestral e anual em até 12x sem juros\n\
✅ Cobrança recorrente no plano mensal\n\n\
0️⃣  VOLTAR";

pub const PAYMENT_PIX: &str = "⚡ *PIX*\n\n\
✅ 5% de desconto à vista\n\
✅ Liberação imediata da matrícula\n\
🔑 *Chave:* contato@devfit.com.br\n\n\
0️⃣  VOLTAR";

pub const PAYMENT_SLIP: &str = "🧾 *BOLETO BANCÁRIO*\n\n\
✅ Vencimento em 3 dias úteis\n\
✅ Liberação após compensação (até 2 dias úteis)\n\n\
0️⃣  VOLTAR";

pub fn schedule_name_prompt() -> String {
    format!(
        "👤 *PARA QUEM É A AULA?*\n\n\
         Digite o *nome completo* do aluno.\n\n\
         1️⃣  USAR MEU NOME ({{contact}})\n\
         {BACK_TO_MENU}"
    )
}

pub const SCHEDULE_NAME_INVALID: &str =
    "❌ Digite o nome do aluno, 1 para usar o seu nome ou 0 para voltar.";

pub const CONFIRM_PROMPT: &str = "📝 *CONFIRME SEU AGENDAMENTO*\n\n\
👤 *Nome:* {name}\n\
📅 *Data/Horário:* {time}\n\n\
1️⃣  CONFIRMAR\n\
2️⃣  ESCOLHER OUTRO HORÁRIO\n\
0️⃣  CANCELAR";

pub const CONFIRM_INVALID: &str = "❌ Digite 1 para confirmar, 2 para trocar o horário ou 0 para cancelar.";

pub fn farewell(business: &str) -> String {
    let business = escape(business);
    format!(
        "👋 *Atendimento encerrado.*\n\n\
         Obrigado por falar com a *{business}*! \
         Quando quiser, é só mandar uma nova mensagem. 💪"
    )
}
